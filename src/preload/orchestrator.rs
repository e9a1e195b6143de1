//! Preload Orchestrator
//!
//! Warms the cache before traffic arrives, in four ordered phases:
//!
//! 1. Mega: every user and product facet plus global aggregates, all at once
//! 2. Ultra-high-frequency: critical-path keys, one after another
//! 3. Database bypass: long-lived static and precomputed keys, one after another
//! 4. Massive: a numbered batch, loaded in fixed-size chunks
//!
//! Every item goes through `Cache::cached`. Phases 1 and 4 ask the injected
//! `PreloadSource`; phases 2 and 3 store the catalog's literal placeholders.
//! A failing item is logged and counted; it never stops its phase or the
//! sequence.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{Cache, CacheMetrics, TargetProgress};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::preload::catalog::{
    MassiveItem, StaticItem, DATABASE_BYPASS, GLOBAL_AGGREGATES, PRODUCT_FACETS,
    ULTRA_HIGH_FREQUENCY, USER_FACETS,
};
use crate::preload::{
    PreloadMetrics, PreloadMetricsSnapshot, PreloadPhase, PreloadRequest, PreloadSource,
};

// == Preload Plan ==
/// Sizes of the synthetic batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadPlan {
    /// User ids 1..=users
    pub users: u64,
    /// Product ids 1..=products
    pub products: u64,
    pub massive_batch_size: usize,
    pub massive_chunk_size: usize,
}

impl PreloadPlan {
    pub fn from_config(config: &Config) -> Self {
        Self {
            users: config.preload_users,
            products: config.preload_products,
            massive_batch_size: config.massive_batch_size,
            massive_chunk_size: config.massive_chunk_size.max(1),
        }
    }

    /// Number of mega-phase operations this plan schedules.
    pub fn mega_operations(&self) -> u64 {
        self.users * USER_FACETS.len() as u64
            + self.products * PRODUCT_FACETS.len() as u64
            + GLOBAL_AGGREGATES.len() as u64
    }
}

impl Default for PreloadPlan {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

// == Optimization Stats ==
/// Snapshot combining live cache metrics with preload progress.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationStats {
    pub metrics: CacheMetrics,
    pub preload: PreloadMetricsSnapshot,
    pub total_entries: usize,
    pub target: TargetProgress,
    /// RFC 3339 timestamp of the snapshot
    pub generated_at: String,
}

// == Orchestrator ==
struct Inner {
    cache: Cache,
    source: Arc<dyn PreloadSource>,
    plan: PreloadPlan,
    target_percent: f64,
    metrics: PreloadMetrics,
    started: AtomicBool,
}

/// Drives the startup preload. Cloning yields another handle to the same
/// orchestrator; the sequence runs at most once.
#[derive(Clone)]
pub struct PreloadOrchestrator {
    inner: Arc<Inner>,
}

impl PreloadOrchestrator {
    /// Creates an idle orchestrator. Nothing is loaded until `start`.
    pub fn new(
        cache: Cache,
        source: Arc<dyn PreloadSource>,
        plan: PreloadPlan,
        target_percent: f64,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                cache,
                source,
                plan,
                target_percent,
                metrics: PreloadMetrics::new(),
                started: AtomicBool::new(false),
            }),
        }
    }

    pub fn from_config(cache: Cache, source: Arc<dyn PreloadSource>, config: &Config) -> Self {
        Self::new(
            cache,
            source,
            PreloadPlan::from_config(config),
            config.load_reduction_target,
        )
    }

    // == Start ==
    /// Spawns the four-phase sequence and returns without waiting for it.
    ///
    /// Fails with `AlreadyStarted` on every call after the first.
    pub fn start(&self) -> Result<JoinHandle<()>> {
        if self
            .inner
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CacheError::AlreadyStarted);
        }

        let orchestrator = self.clone();
        Ok(tokio::spawn(async move { orchestrator.run().await }))
    }

    async fn run(&self) {
        let started = Instant::now();
        info!(plan = ?self.inner.plan, "Starting cache preload");

        self.mega_preload().await;
        self.sequential_phase(PreloadPhase::UltraHighFrequency, ULTRA_HIGH_FREQUENCY).await;
        self.sequential_phase(PreloadPhase::DatabaseBypass, DATABASE_BYPASS).await;
        self.massive_preload().await;

        self.inner.metrics.enter_phase(PreloadPhase::Completed);

        let stats = self.final_optimization_stats().await;
        info!(
            "Cache preload complete in {}ms: {} operations scheduled, {} failed, {} entries cached",
            started.elapsed().as_millis(),
            stats.preload.total_scheduled(),
            stats.preload.failed_operations,
            stats.total_entries
        );
    }

    // == Phase 1 ==
    async fn mega_preload(&self) {
        let phase_start = Instant::now();
        self.inner.metrics.enter_phase(PreloadPhase::Mega);

        let plan = self.inner.plan;
        let users = (1..=plan.users).flat_map(|user_id| {
            USER_FACETS
                .iter()
                .map(move |&facet| PreloadRequest::UserFacet { user_id, facet })
        });
        let products = (1..=plan.products).flat_map(|product_id| {
            PRODUCT_FACETS
                .iter()
                .map(move |&facet| PreloadRequest::ProductFacet { product_id, facet })
        });
        let globals = GLOBAL_AGGREGATES
            .iter()
            .map(|&name| PreloadRequest::Global { name });

        let requests: Vec<PreloadRequest> = users.chain(products).chain(globals).collect();
        self.inner
            .metrics
            .record_scheduled(PreloadPhase::Mega, requests.len() as u64);

        let results = join_all(requests.into_iter().map(|request| self.preload_one(request))).await;
        let loaded = results.iter().filter(|&&ok| ok).count();

        info!(
            "Mega preload: {}/{} entries in {}ms",
            loaded,
            results.len(),
            phase_start.elapsed().as_millis()
        );
    }

    // == Phases 2 and 3 ==
    async fn sequential_phase(&self, phase: PreloadPhase, items: &'static [StaticItem]) {
        let phase_start = Instant::now();
        self.inner.metrics.enter_phase(phase);

        let mut loaded = 0;
        for item in items {
            self.inner.metrics.record_scheduled(phase, 1);
            if self.preload_static(item).await {
                loaded += 1;
            }
        }

        info!(
            "{:?} preload: {}/{} entries in {}ms",
            phase,
            loaded,
            items.len(),
            phase_start.elapsed().as_millis()
        );
    }

    // == Phase 4 ==
    async fn massive_preload(&self) {
        let phase_start = Instant::now();
        self.inner.metrics.enter_phase(PreloadPhase::Massive);

        let plan = self.inner.plan;
        let indices: Vec<usize> = (0..plan.massive_batch_size).collect();
        let chunks: Vec<&[usize]> = indices.chunks(plan.massive_chunk_size.max(1)).collect();
        let mut loaded = 0;

        for (chunk_idx, chunk) in chunks.iter().enumerate() {
            self.inner
                .metrics
                .record_scheduled(PreloadPhase::Massive, chunk.len() as u64);

            let tasks = chunk
                .iter()
                .map(|&index| self.preload_one(PreloadRequest::Generic(MassiveItem::new(index))));
            let results = join_all(tasks).await;
            loaded += results.iter().filter(|&&ok| ok).count();

            debug!(
                "Massive preload chunk {}/{} ({} keys) done",
                chunk_idx + 1,
                chunks.len(),
                chunk.len()
            );
        }

        info!(
            "Massive preload: {}/{} entries in {} chunks, {}ms",
            loaded,
            indices.len(),
            chunks.len(),
            phase_start.elapsed().as_millis()
        );
    }

    /// Loads one request from the source through the cache.
    async fn preload_one(&self, request: PreloadRequest) -> bool {
        let key = request.key();
        let category = request.category();
        let ttl = request.ttl();
        let source = Arc::clone(&self.inner.source);

        self.load_isolated(&key, category, ttl, || async move {
            source.load(&request).await
        })
        .await
    }

    /// Stores a catalog item's literal placeholder through the cache.
    async fn preload_static(&self, item: &'static StaticItem) -> bool {
        self.load_isolated(item.key, item.category, item.ttl, || async move {
            Ok((item.placeholder)())
        })
        .await
    }

    /// Runs `loader` through `Cache::cached`. Returns false on failure.
    async fn load_isolated<F, Fut>(
        &self,
        key: &str,
        category: &str,
        ttl: Duration,
        loader: F,
    ) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<Value>>,
    {
        match self.inner.cache.cached(key, loader, category, ttl).await {
            Ok(_) => true,
            Err(err) => {
                self.inner.metrics.record_failure();
                warn!(key, error = %err, "Preload item failed, continuing");
                false
            }
        }
    }

    // == Stats ==
    /// Current cache metrics and preload counts. Safe to call at any time,
    /// including before or during the preload.
    pub async fn final_optimization_stats(&self) -> OptimizationStats {
        let cache = &self.inner.cache;

        OptimizationStats {
            metrics: cache.metrics(),
            preload: self.inner.metrics.snapshot(),
            total_entries: cache.len().await,
            target: cache.progress_to_target(self.inner.target_percent),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn phase(&self) -> PreloadPhase {
        self.inner.metrics.phase()
    }

    pub fn is_started(&self) -> bool {
        self.inner.started.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for PreloadOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreloadOrchestrator")
            .field("plan", &self.inner.plan)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}
