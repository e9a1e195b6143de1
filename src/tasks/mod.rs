//! Background Tasks Module
//!
//! Long-running tasks spawned at startup.
//!
//! # Tasks
//! - Expiry sweep: drops expired cache entries at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
