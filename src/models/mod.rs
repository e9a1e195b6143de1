//! Request and Response models for the ops API
//!
//! DTOs serialized to and from the internal stats/invalidation endpoints.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ProgressQuery;
pub use responses::{ClearResponse, DeleteResponse, ErrorResponse, HealthResponse, StatsResponse};
