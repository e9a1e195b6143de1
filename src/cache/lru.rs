//! Recency Tracker Module
//!
//! Access-order bookkeeping used only when the store is given a size bound.
//! Backed by `lru::LruCache`, so touch and eviction are O(1).

use lru::LruCache;

// == Recency Tracker ==
/// Keys in access order, least recently used first out.
pub(crate) struct LruTracker {
    order: LruCache<String, ()>,
}

impl Default for LruTracker {
    fn default() -> Self {
        Self {
            order: LruCache::unbounded(),
        }
    }
}

impl std::fmt::Debug for LruTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruTracker")
            .field("tracked", &self.order.len())
            .finish()
    }
}

impl LruTracker {
    /// Marks `key` as most recently used.
    pub(crate) fn touch(&mut self, key: &str) {
        if self.order.get(key).is_none() {
            self.order.put(key.to_string(), ());
        }
    }

    /// Forgets `key`. Unknown keys are ignored.
    pub(crate) fn remove(&mut self, key: &str) {
        self.order.pop(key);
    }

    /// Pops the least recently used key.
    pub(crate) fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_lru().map(|(key, ())| key)
    }

    /// Forgets every key.
    pub(crate) fn clear(&mut self) {
        self.order.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn drain(lru: &mut LruTracker) -> Vec<String> {
        std::iter::from_fn(|| lru.evict_oldest()).collect()
    }

    #[test]
    fn test_evicts_in_insertion_order_without_touches() {
        let mut lru = LruTracker::default();
        lru.touch("user:complete:1");
        lru.touch("user:complete:2");
        lru.touch("user:complete:3");

        assert_eq!(lru.evict_oldest(), Some("user:complete:1".to_string()));
        assert_eq!(lru.evict_oldest(), Some("user:complete:2".to_string()));
        assert_eq!(drain(&mut lru), vec!["user:complete:3"]);
    }

    #[test]
    fn test_touch_protects_key() {
        let mut lru = LruTracker::default();
        lru.touch("a");
        lru.touch("b");
        lru.touch("c");

        lru.touch("a");

        assert_eq!(drain(&mut lru), vec!["b", "c", "a"]);
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_repeated_touch_keeps_single_slot() {
        let mut lru = LruTracker::default();
        lru.touch("k");
        lru.touch("k");
        lru.touch("k");

        assert_eq!(drain(&mut lru), vec!["k"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut lru = LruTracker::default();
        lru.touch("a");
        lru.touch("b");

        lru.remove("missing");
        lru.remove("a");
        assert_eq!(lru.evict_oldest(), Some("b".to_string()));

        lru.touch("c");
        lru.touch("d");
        lru.clear();
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_many_keys_keep_access_order() {
        let mut lru = LruTracker::default();
        for i in 0..10_000 {
            lru.touch(&format!("massive:item:{}", i));
        }
        lru.touch("massive:item:0");

        assert_eq!(lru.evict_oldest(), Some("massive:item:1".to_string()));
        let rest = drain(&mut lru);
        assert_eq!(rest.len(), 9_998);
        assert_eq!(rest.last().map(String::as_str), Some("massive:item:0"));
    }
}
