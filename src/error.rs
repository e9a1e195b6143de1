//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror. Loader failures are not
//! represented here: `Cache::cached` hands the caller's own error back untouched.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Errors raised by the cache layer itself.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not present (or already stale) in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data on the ops surface
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The preload sequence was already started for this orchestrator
    #[error("Preload already started")]
    AlreadyStarted,
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::AlreadyStarted => StatusCode::CONFLICT,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
