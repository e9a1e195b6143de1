//! API Routes
//!
//! Configures the Axum router for the internal ops endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_handler, health_handler, optimization_handler, progress_handler,
    stats_handler, AppState,
};

/// Creates the ops router.
///
/// # Endpoints
/// - `GET /health` - Health check with preload phase
/// - `GET /stats` - Hit/miss metrics and entry counts
/// - `GET /stats/progress` - Progress toward a load reduction target
/// - `GET /stats/optimization` - Cache metrics combined with preload counts
/// - `DELETE /cache/:key` - Invalidate one key
/// - `DELETE /cache` - Drop every entry
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/stats/progress", get(progress_handler))
        .route("/stats/optimization", get(optimization_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/:key", delete(delete_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
