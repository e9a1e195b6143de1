//! Preload Module
//!
//! Startup cache warming: the fixed key catalog, the source trait that
//! produces values, and the orchestrator that runs the phases.

pub mod catalog;
mod metrics;
mod orchestrator;
mod source;

pub use metrics::{PreloadMetrics, PreloadMetricsSnapshot, PreloadPhase};
pub use orchestrator::{OptimizationStats, PreloadOrchestrator, PreloadPlan};
pub use source::{PlaceholderSource, PreloadRequest, PreloadSource};
