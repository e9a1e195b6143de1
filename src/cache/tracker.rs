//! Performance Tracker Module
//!
//! Lock-free hit/miss counters and the derived hit-rate and
//! database-load-reduction gauges.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::Serialize;
use tracing::warn;

// == Snapshots ==
/// Aggregate metrics computed from the live counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    /// hits / (hits + misses), 0.0 before any lookup
    pub hit_rate: f64,
    /// Estimated share of backing-store reads avoided, in percent
    pub database_load_reduction: f64,
}

/// Hit/miss counts attributed to one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryMetrics {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// How far the current load reduction is from a target percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetProgress {
    pub target_percent: f64,
    pub current_percent: f64,
    /// 0..=100
    pub progress: f64,
}

// == Performance Tracker ==
/// Process-wide hit/miss accounting for the memoized loader.
#[derive(Debug, Default)]
pub struct PerformanceTracker {
    hits: AtomicU64,
    misses: AtomicU64,
    by_category: Mutex<BTreeMap<String, (u64, u64)>>,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Recording ==
    pub fn record_hit(&self, category: &str) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        self.attribute(category, |counts| counts.0 += 1);
    }

    pub fn record_miss(&self, category: &str) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.attribute(category, |counts| counts.1 += 1);
    }

    fn attribute(&self, category: &str, bump: impl FnOnce(&mut (u64, u64))) {
        match self.by_category.lock() {
            Ok(mut map) => bump(map.entry(category.to_string()).or_default()),
            // Attribution is best effort; the totals above are already counted.
            Err(_) => warn!(category, "category counters unavailable"),
        }
    }

    // == Metrics ==
    /// Computes the current metrics. Never fails.
    pub fn metrics(&self) -> CacheMetrics {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = hit_rate(hits, misses);

        CacheMetrics {
            hits,
            misses,
            hit_rate,
            // A hit is one avoided backing-store read.
            database_load_reduction: hit_rate * 100.0,
        }
    }

    /// Per-category breakdown, sorted by category name.
    pub fn category_metrics(&self) -> BTreeMap<String, CategoryMetrics> {
        let Ok(map) = self.by_category.lock() else {
            return BTreeMap::new();
        };

        map.iter()
            .map(|(category, &(hits, misses))| {
                let metrics = CategoryMetrics {
                    hits,
                    misses,
                    hit_rate: hit_rate(hits, misses),
                };
                (category.clone(), metrics)
            })
            .collect()
    }

    // == Progress To Target ==
    /// `min(100, reduction / target * 100)`. A target that is not a positive
    /// number counts as already met.
    pub fn progress_to_target(&self, target_percent: f64) -> TargetProgress {
        let current = self.metrics().database_load_reduction;

        let progress = if target_percent.is_finite() && target_percent > 0.0 {
            (current / target_percent * 100.0).min(100.0)
        } else {
            100.0
        };

        TargetProgress {
            target_percent,
            current_percent: current,
            progress,
        }
    }
}

fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
