//! Entry Store Module
//!
//! Keyed map of cache entries with freshness-checked reads, plus an optional
//! size bound enforced through LRU eviction.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::lru::LruTracker;
use crate::cache::CacheEntry;
use crate::error::{CacheError, Result};

// == Entry Store ==
/// Holds cache entries. Unbounded unless `max_entries` is given.
#[derive(Debug, Default)]
pub struct EntryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Access order, maintained only when bounded
    lru: LruTracker,
    /// Optional capacity; `None` keeps every key until it expires
    max_entries: Option<usize>,
    /// Entries dropped to honor `max_entries`
    evictions: u64,
}

impl EntryStore {
    // == Constructors ==
    /// Creates an unbounded store. Entries leave only by expiry or deletion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that evicts the least recently used key once
    /// `max_entries` keys are held.
    pub fn with_capacity_limit(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries.max(1)),
            ..Self::default()
        }
    }

    // == Get ==
    /// Returns the value stored under `key` if it is fresh and of type `T`.
    ///
    /// A stale entry is removed and reported as absent.
    pub fn get<T>(&mut self, key: &str) -> Option<T>
    where
        T: Clone + 'static,
    {
        let entry = self.fresh_entry(key)?;
        let value = entry.value_as::<T>();
        if value.is_none() {
            debug!(key, "cached value has a different type than requested");
        }
        value
    }

    /// Returns the fresh entry for `key`, dropping it if it has expired.
    fn fresh_entry(&mut self, key: &str) -> Option<&CacheEntry> {
        let expired = self.entries.get(key)?.is_expired();
        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            return None;
        }

        if self.max_entries.is_some() {
            self.lru.touch(key);
        }
        self.entries.get(key)
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry, expiring
    /// `ttl` from now.
    pub fn set<T>(&mut self, key: impl Into<String>, value: T, category: &str, ttl: Duration)
    where
        T: Send + Sync + 'static,
    {
        let key = key.into();

        if let Some(max_entries) = self.max_entries {
            if !self.entries.contains_key(&key) && self.entries.len() >= max_entries {
                self.evict_one();
            }
            self.lru.touch(&key);
        }

        self.entries.insert(key, CacheEntry::new(Arc::new(value), category, ttl));
    }

    fn evict_one(&mut self) {
        while let Some(oldest) = self.lru.evict_oldest() {
            if self.entries.remove(&oldest).is_some() {
                self.evictions += 1;
                debug!(key = %oldest, "evicted least recently used entry");
                return;
            }
        }
    }

    // == Delete ==
    /// Removes `key`. Fails with `NotFound` when nothing fresh was stored.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.lru.remove(key);
        match self.entries.remove(key) {
            Some(entry) if !entry.is_expired() => Ok(()),
            _ => Err(CacheError::NotFound(key.to_string())),
        }
    }

    // == Clear ==
    /// Drops every entry, returning how many were held.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        count
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        expired_keys.len()
    }

    // == Introspection ==
    /// Number of entries held, including stale ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Fresh entry counts grouped by category.
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for entry in self.entries.values().filter(|e| !e.is_expired()) {
            *counts.entry(entry.category.clone()).or_insert(0) += 1;
        }
        counts
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn test_store_new() {
        let store = EntryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.evictions(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut store = EntryStore::new();
        store.set("user:complete:42", json!({"id": 42}), "users", MINUTE);

        assert_eq!(store.get::<Value>("user:complete:42"), Some(json!({"id": 42})));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let mut store = EntryStore::new();
        assert_eq!(store.get::<Value>("nope"), None);
    }

    #[test]
    fn test_get_wrong_type_reads_absent() {
        let mut store = EntryStore::new();
        store.set("count", 5u64, "stats", MINUTE);

        assert_eq!(store.get::<String>("count"), None);
        assert_eq!(store.get::<u64>("count"), Some(5));
    }

    #[test]
    fn test_overwrite_last_write_wins() {
        let mut store = EntryStore::new();
        store.set("p:1", json!({"price": 10}), "products", MINUTE);
        store.set("p:1", json!({"price": 12}), "pricing", MINUTE);

        assert_eq!(store.get::<Value>("p:1"), Some(json!({"price": 12})));
        assert_eq!(store.len(), 1);
        assert_eq!(store.category_counts().get("pricing"), Some(&1));
        assert_eq!(store.category_counts().get("products"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_product_price_expires_after_ttl() {
        let mut store = EntryStore::new();
        store.set("p:1", json!({"price": 10}), "products", Duration::from_millis(60_000));

        assert_eq!(store.get::<Value>("p:1"), Some(json!({"price": 10})));

        tokio::time::advance(Duration::from_millis(60_001)).await;

        assert_eq!(store.get::<Value>("p:1"), None);
        assert!(store.is_empty(), "stale entry is dropped on read");
    }

    #[test]
    fn test_delete() {
        let mut store = EntryStore::new();
        store.set("k", 1u8, "misc", MINUTE);

        store.delete("k").unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.delete("k"), Err(CacheError::NotFound(_))));
    }

    #[test]
    fn test_clear() {
        let mut store = EntryStore::new();
        store.set("a", 1u8, "misc", MINUTE);
        store.set("b", 2u8, "misc", MINUTE);

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_expired() {
        let mut store = EntryStore::new();
        store.set("short", 1u8, "misc", Duration::from_secs(1));
        store.set("long", 2u8, "misc", Duration::from_secs(10));

        tokio::time::advance(Duration::from_millis(1_100)).await;

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get::<u8>("long"), Some(2));
    }

    #[test]
    fn test_bounded_store_evicts_least_recently_used() {
        let mut store = EntryStore::with_capacity_limit(3);
        store.set("a", 1u8, "misc", MINUTE);
        store.set("b", 2u8, "misc", MINUTE);
        store.set("c", 3u8, "misc", MINUTE);

        // Reading "a" makes "b" the eviction candidate.
        assert_eq!(store.get::<u8>("a"), Some(1));
        store.set("d", 4u8, "misc", MINUTE);

        assert_eq!(store.len(), 3);
        assert_eq!(store.evictions(), 1);
        assert_eq!(store.get::<u8>("b"), None);
        assert_eq!(store.get::<u8>("a"), Some(1));
        assert_eq!(store.get::<u8>("d"), Some(4));
    }

    #[test]
    fn test_bounded_store_overwrite_does_not_evict() {
        let mut store = EntryStore::with_capacity_limit(2);
        store.set("a", 1u8, "misc", MINUTE);
        store.set("b", 2u8, "misc", MINUTE);
        store.set("a", 9u8, "misc", MINUTE);

        assert_eq!(store.evictions(), 0);
        assert_eq!(store.get::<u8>("a"), Some(9));
        assert_eq!(store.get::<u8>("b"), Some(2));
    }

    #[test]
    fn test_unbounded_store_never_evicts() {
        let mut store = EntryStore::new();
        for i in 0..5_000 {
            store.set(format!("massive:item:{}", i), i, "generic", MINUTE);
        }
        assert_eq!(store.len(), 5_000);
        assert_eq!(store.evictions(), 0);
    }

    #[test]
    fn test_category_counts() {
        let mut store = EntryStore::new();
        store.set("user:profile:1", 1u8, "users", MINUTE);
        store.set("user:profile:2", 2u8, "users", MINUTE);
        store.set("product:data:1", 3u8, "products", MINUTE);

        let counts = store.category_counts();
        assert_eq!(counts.get("users"), Some(&2));
        assert_eq!(counts.get("products"), Some(&1));
    }
}
