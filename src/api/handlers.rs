//! API Handlers
//!
//! HTTP handlers for the internal ops endpoints: health, cache metrics,
//! preload statistics and forced invalidation.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::cache::{Cache, TargetProgress};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{ClearResponse, DeleteResponse, HealthResponse, ProgressQuery, StatsResponse};
use crate::preload::{OptimizationStats, PreloadOrchestrator};

/// Application state shared across all handlers.
///
/// Holds the single cache handle and preload orchestrator for the process.
#[derive(Clone, Debug)]
pub struct AppState {
    pub cache: Cache,
    pub preloader: PreloadOrchestrator,
    /// Default load reduction target, in percent
    pub target_percent: f64,
}

impl AppState {
    pub fn new(cache: Cache, preloader: PreloadOrchestrator, target_percent: f64) -> Self {
        Self {
            cache,
            preloader,
            target_percent,
        }
    }

    /// Builds the cache and an idle orchestrator from configuration.
    pub fn from_config(
        config: &Config,
        source: std::sync::Arc<dyn crate::preload::PreloadSource>,
    ) -> Self {
        let cache = Cache::from_config(config);
        let preloader = PreloadOrchestrator::from_config(cache.clone(), source, config);
        Self::new(cache, preloader, config.load_reduction_target)
    }
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.preloader.phase()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = &state.cache;

    Json(StatsResponse::new(
        cache.metrics(),
        cache.len().await,
        cache.evictions().await,
        cache.category_counts().await,
        cache.category_metrics(),
    ))
}

/// Handler for GET /stats/progress?target=<percent>
pub async fn progress_handler(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<TargetProgress>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let target = query.target.unwrap_or(state.target_percent);
    Ok(Json(state.cache.progress_to_target(target)))
}

/// Handler for GET /stats/optimization
pub async fn optimization_handler(State(state): State<AppState>) -> Json<OptimizationStats> {
    Json(state.preloader.final_optimization_stats().await)
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.cache.delete(&key).await?;
    info!(key = %key, "Cache entry invalidated");

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.cache.clear().await;
    info!("Cache cleared: {} entries removed", removed);

    Json(ClearResponse::new(removed))
}
