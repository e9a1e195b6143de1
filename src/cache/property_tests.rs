//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store, tracker and loader against simple models.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{Cache, EntryStore, PerformanceTracker};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Colon-delimited keys drawn from a small space so operations collide.
fn key_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("user"), Just("product"), Just("global")],
        0u64..8,
    )
        .prop_map(|(kind, id)| format!("{}:data:{}", kind, id))
}

fn category_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("users".to_string()),
        Just("products".to_string()),
        Just("ultra_critical".to_string()),
    ]
}

#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: u32, category: String },
    Get { key: String },
    Delete { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), any::<u32>(), category_strategy())
            .prop_map(|(key, value, category)| StoreOp::Set { key, value, category }),
        key_strategy().prop_map(|key| StoreOp::Get { key }),
        key_strategy().prop_map(|key| StoreOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any sequence of operations leaves the store agreeing with a plain map:
    // one entry per key, last write wins.
    #[test]
    fn prop_store_matches_model(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let mut store = EntryStore::new();
        let mut model: HashMap<String, u32> = HashMap::new();

        for op in ops {
            match op {
                StoreOp::Set { key, value, category } => {
                    store.set(key.clone(), value, &category, TEST_TTL);
                    model.insert(key, value);
                }
                StoreOp::Get { key } => {
                    prop_assert_eq!(store.get::<u32>(&key), model.get(&key).copied());
                }
                StoreOp::Delete { key } => {
                    let removed = store.delete(&key).is_ok();
                    prop_assert_eq!(removed, model.remove(&key).is_some());
                }
            }
        }

        prop_assert_eq!(store.len(), model.len());
    }

    // A bounded store never holds more than its limit.
    #[test]
    fn prop_capacity_enforcement(
        keys in prop::collection::vec(key_strategy(), 1..100),
        limit in 1usize..10
    ) {
        let mut store = EntryStore::with_capacity_limit(limit);

        for (i, key) in keys.into_iter().enumerate() {
            store.set(key, i, "users", TEST_TTL);
            prop_assert!(store.len() <= limit, "{} entries exceed limit {}", store.len(), limit);
        }
    }

    // hit_rate == hits / (hits + misses) and load reduction is its percentage.
    #[test]
    fn prop_hit_rate_math(outcomes in prop::collection::vec(any::<bool>(), 0..200)) {
        let tracker = PerformanceTracker::new();
        for &hit in &outcomes {
            if hit {
                tracker.record_hit("users");
            } else {
                tracker.record_miss("users");
            }
        }

        let hits = outcomes.iter().filter(|&&h| h).count() as u64;
        let misses = outcomes.len() as u64 - hits;
        let metrics = tracker.metrics();

        prop_assert_eq!(metrics.hits, hits);
        prop_assert_eq!(metrics.misses, misses);
        if outcomes.is_empty() {
            prop_assert_eq!(metrics.hit_rate, 0.0);
        } else {
            prop_assert!((metrics.hit_rate - hits as f64 / outcomes.len() as f64).abs() < 1e-12);
        }
        prop_assert!((metrics.database_load_reduction - metrics.hit_rate * 100.0).abs() < 1e-9);
    }

    // Progress is always a percentage, whatever the target.
    #[test]
    fn prop_progress_bounded(
        hits in 0u64..50,
        misses in 0u64..50,
        target in prop_oneof![any::<f64>(), 0.1f64..100.0]
    ) {
        let tracker = PerformanceTracker::new();
        (0..hits).for_each(|_| tracker.record_hit("products"));
        (0..misses).for_each(|_| tracker.record_miss("products"));

        let progress = tracker.progress_to_target(target).progress;
        prop_assert!((0.0..=100.0).contains(&progress), "progress {} out of range", progress);
    }

    // Repeated reads within the TTL run the loader once and return its first value.
    #[test]
    fn prop_loader_runs_once_per_fresh_key(key in key_strategy(), repeats in 1usize..20) {
        let cache = Cache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let results: Vec<usize> = tokio_test::block_on(async {
            let mut results = Vec::with_capacity(repeats);
            for _ in 0..repeats {
                let calls = Arc::clone(&calls);
                let value = cache
                    .cached(
                        &key,
                        || async move { Ok::<_, ()>(calls.fetch_add(1, Ordering::SeqCst)) },
                        "users",
                        TEST_TTL,
                    )
                    .await;
                results.push(value.unwrap_or(usize::MAX));
            }
            results
        });

        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
        prop_assert!(results.iter().all(|&v| v == 0));

        let metrics = cache.metrics();
        prop_assert_eq!(metrics.misses, 1);
        prop_assert_eq!(metrics.hits, repeats as u64 - 1);
    }
}
