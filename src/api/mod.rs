//! API Module
//!
//! Internal ops endpoints over the cache: health, metrics, preload stats and
//! forced invalidation.
//!
//! # Endpoints
//! - `GET /health` - Health check
//! - `GET /stats` - Cache metrics
//! - `GET /stats/progress` - Progress toward the load reduction target
//! - `GET /stats/optimization` - Cache metrics plus preload counts
//! - `DELETE /cache/:key` - Invalidate a key
//! - `DELETE /cache` - Clear the cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
