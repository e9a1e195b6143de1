//! Cache Module
//!
//! In-process read-through cache: TTL entry store, memoized loader and
//! hit/miss tracking.

mod entry;
pub mod keys;
mod loader;
mod lru;
mod store;
mod tracker;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, CacheValue};
pub use loader::Cache;
pub use store::EntryStore;
pub use tracker::{CacheMetrics, CategoryMetrics, PerformanceTracker, TargetProgress};
