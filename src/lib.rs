//! Market Cache - in-process read-through cache for a marketplace backend
//!
//! TTL entries tagged by category, a memoized loader with hit/miss tracking,
//! and a startup preloader that warms the store before traffic arrives.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod preload;
pub mod tasks;

pub use api::AppState;
pub use cache::Cache;
pub use config::Config;
pub use error::{CacheError, Result};
pub use preload::{PlaceholderSource, PreloadOrchestrator, PreloadSource};
pub use tasks::spawn_cleanup_task;
