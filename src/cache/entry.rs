//! Cache Entry Module
//!
//! Defines a single stored record: an opaque value tagged with a category and
//! an absolute expiry instant.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

/// Opaque payload held by the store. Typed reads downcast to the caller's `T`.
pub type CacheValue = Arc<dyn Any + Send + Sync>;

// == Cache Entry ==
/// A single cache record with its category and expiry.
#[derive(Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: CacheValue,
    /// Attribution label (e.g. "users", "products", "ultra_critical")
    pub category: String,
    /// Instant at or after which the entry is stale
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    pub fn new(value: CacheValue, category: impl Into<String>, ttl: Duration) -> Self {
        Self {
            value,
            category: category.into(),
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so a
    /// zero TTL is stale immediately.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Downcast ==
    /// Returns a clone of the value if it was stored as `T`.
    pub fn value_as<T>(&self) -> Option<T>
    where
        T: Clone + 'static,
    {
        self.value.downcast_ref::<T>().cloned()
    }
}

impl std::fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("category", &self.category)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
