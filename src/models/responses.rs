//! Response DTOs for the ops API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::{CacheMetrics, CategoryMetrics};
use crate::preload::PreloadPhase;

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    /// Estimated percentage of backing-store reads avoided
    pub database_load_reduction: f64,
    /// Entries currently held, including stale ones not yet swept
    pub total_entries: usize,
    /// Entries dropped to honor a size bound
    pub evictions: u64,
    /// Fresh entries per category
    pub entries_by_category: BTreeMap<String, usize>,
    /// Hit/miss attribution per category
    pub categories: BTreeMap<String, CategoryMetrics>,
}

impl StatsResponse {
    pub fn new(
        metrics: CacheMetrics,
        total_entries: usize,
        evictions: u64,
        entries_by_category: BTreeMap<String, usize>,
        categories: BTreeMap<String, CategoryMetrics>,
    ) -> Self {
        Self {
            hits: metrics.hits,
            misses: metrics.misses,
            hit_rate: metrics.hit_rate,
            database_load_reduction: metrics.database_load_reduction,
            total_entries,
            evictions,
            entries_by_category,
            categories,
        }
    }
}

/// Response body for `DELETE /cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' invalidated", key),
            key,
        }
    }
}

/// Response body for `DELETE /cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Cleared {} entries", removed),
            removed,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current phase of the startup preload
    pub preload_phase: PreloadPhase,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(preload_phase: PreloadPhase) -> Self {
        Self {
            status: "healthy".to_string(),
            preload_phase,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_serialize() {
        let metrics = CacheMetrics {
            hits: 8,
            misses: 2,
            hit_rate: 0.8,
            database_load_reduction: 80.0,
        };
        let mut by_category = BTreeMap::new();
        by_category.insert("users".to_string(), 3);

        let resp = StatsResponse::new(metrics, 3, 0, by_category, BTreeMap::new());
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["hits"], 8);
        assert_eq!(json["database_load_reduction"], 80.0);
        assert_eq!(json["entries_by_category"]["users"], 3);
    }

    #[test]
    fn test_delete_and_clear_messages() {
        let deleted = DeleteResponse::new("user:cart:7");
        assert!(deleted.message.contains("user:cart:7"));

        let cleared = ClearResponse::new(12);
        assert_eq!(cleared.removed, 12);
        assert!(cleared.message.contains("12"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy(PreloadPhase::Mega);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("\"preload_phase\":\"mega\""));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Key not found: x");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"error":"Key not found: x"}"#);
    }
}
