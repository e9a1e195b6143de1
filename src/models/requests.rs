//! Request DTOs for the ops API
//!
//! Defines the query parameters accepted by the stats endpoints.

use serde::Deserialize;

/// Query string for `GET /stats/progress`
///
/// `target` is a load reduction percentage; the configured target is used
/// when it is omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressQuery {
    #[serde(default)]
    pub target: Option<f64>,
}

impl ProgressQuery {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.target {
            Some(target) if !target.is_finite() || target <= 0.0 || target > 100.0 => Some(
                format!("Target must be a percentage in (0, 100], got {}", target),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_query_deserialize() {
        let query: ProgressQuery = serde_json::from_str(r#"{"target": 75.5}"#).unwrap();
        assert_eq!(query.target, Some(75.5));

        let empty: ProgressQuery = serde_json::from_str("{}").unwrap();
        assert!(empty.target.is_none());
    }

    #[test]
    fn test_validate() {
        assert!(ProgressQuery { target: None }.validate().is_none());
        assert!(ProgressQuery { target: Some(90.0) }.validate().is_none());
        assert!(ProgressQuery { target: Some(100.0) }.validate().is_none());
        assert!(ProgressQuery { target: Some(0.0) }.validate().is_some());
        assert!(ProgressQuery { target: Some(-1.0) }.validate().is_some());
        assert!(ProgressQuery { target: Some(150.0) }.validate().is_some());
    }
}
