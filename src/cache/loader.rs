//! Memoized Loader Module
//!
//! `Cache` is the shared handle route handlers read through: it pairs the
//! entry store with the performance tracker and exposes `cached`.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::cache::{CacheMetrics, CategoryMetrics, EntryStore, PerformanceTracker, TargetProgress};
use crate::error::Result;

// == Cache Handle ==
/// Cheaply cloneable handle to the process-wide store and tracker.
///
/// Construct one at startup and pass clones to everything that needs it.
#[derive(Clone, Debug, Default)]
pub struct Cache {
    store: Arc<RwLock<EntryStore>>,
    tracker: Arc<PerformanceTracker>,
}

impl Cache {
    /// Creates a cache over an unbounded store.
    pub fn new() -> Self {
        Self::from_store(EntryStore::new())
    }

    /// Creates a cache over the given store.
    pub fn from_store(store: EntryStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            tracker: Arc::new(PerformanceTracker::new()),
        }
    }

    /// Creates a cache from configuration (size bound if `MAX_ENTRIES` is set).
    pub fn from_config(config: &crate::config::Config) -> Self {
        match config.max_entries {
            Some(max_entries) => Self::from_store(EntryStore::with_capacity_limit(max_entries)),
            None => Self::new(),
        }
    }

    // == Cached ==
    /// Returns the fresh value under `key`, or runs `loader` and stores its
    /// result for `ttl`.
    ///
    /// A loader error is returned as-is and nothing is stored, so the next
    /// call loads again. Concurrent misses on the same key each run their
    /// own loader; there is no in-flight de-duplication.
    pub async fn cached<T, E, F, Fut>(
        &self,
        key: &str,
        loader: F,
        category: &str,
        ttl: Duration,
    ) -> std::result::Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let fresh = self.store.write().await.get::<T>(key);

        if let Some(value) = fresh {
            self.tracker.record_hit(category);
            trace!(key, category, "cache hit");
            return Ok(value);
        }

        self.tracker.record_miss(category);
        debug!(key, category, "cache miss, invoking loader");

        let value = loader().await?;

        self.store.write().await.set(key, value.clone(), category, ttl);

        Ok(value)
    }

    // == Direct Store Access ==
    /// Reads a fresh value without touching the hit/miss counters.
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Clone + 'static,
    {
        self.store.write().await.get::<T>(key)
    }

    /// Writes a value directly, bypassing any loader.
    pub async fn set<T>(&self, key: &str, value: T, category: &str, ttl: Duration)
    where
        T: Send + Sync + 'static,
    {
        self.store.write().await.set(key, value, category, ttl);
    }

    /// Forced invalidation of one key.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.store.write().await.delete(key)
    }

    /// Drops every entry, returning how many were held.
    pub async fn clear(&self) -> usize {
        self.store.write().await.clear()
    }

    /// Sweeps expired entries, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    pub async fn evictions(&self) -> u64 {
        self.store.read().await.evictions()
    }

    pub async fn category_counts(&self) -> BTreeMap<String, usize> {
        self.store.read().await.category_counts()
    }

    // == Metrics ==
    pub fn metrics(&self) -> CacheMetrics {
        self.tracker.metrics()
    }

    pub fn category_metrics(&self) -> BTreeMap<String, CategoryMetrics> {
        self.tracker.category_metrics()
    }

    pub fn progress_to_target(&self, target_percent: f64) -> TargetProgress {
        self.tracker.progress_to_target(target_percent)
    }
}
