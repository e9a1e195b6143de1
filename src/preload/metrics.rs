//! Preload metrics
//!
//! Per-phase counts of scheduled preload operations. Observational only.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use serde::Serialize;

/// Where the preload sequence currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreloadPhase {
    NotStarted,
    Mega,
    UltraHighFrequency,
    DatabaseBypass,
    Massive,
    Completed,
}

impl PreloadPhase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Mega,
            2 => Self::UltraHighFrequency,
            3 => Self::DatabaseBypass,
            4 => Self::Massive,
            5 => Self::Completed,
            _ => Self::NotStarted,
        }
    }
}

/// Point-in-time copy of the preload counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreloadMetricsSnapshot {
    pub mega_cache_operations: u64,
    pub ultra_high_frequency_cache: u64,
    pub database_bypass_operations: u64,
    pub massive_preload_operations: u64,
    pub failed_operations: u64,
    pub phase: PreloadPhase,
}

impl PreloadMetricsSnapshot {
    pub fn total_scheduled(&self) -> u64 {
        self.mega_cache_operations
            + self.ultra_high_frequency_cache
            + self.database_bypass_operations
            + self.massive_preload_operations
    }
}

#[derive(Debug, Default)]
pub struct PreloadMetrics {
    mega: AtomicU64,
    ultra: AtomicU64,
    bypass: AtomicU64,
    massive: AtomicU64,
    failed: AtomicU64,
    phase: AtomicU8,
}

impl PreloadMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_phase(&self, phase: PreloadPhase) {
        self.phase.store(phase as u8, Ordering::Release);
    }

    pub fn phase(&self) -> PreloadPhase {
        PreloadPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Counts `n` operations scheduled in `phase`. Other phases are ignored.
    pub fn record_scheduled(&self, phase: PreloadPhase, n: u64) {
        let counter = match phase {
            PreloadPhase::Mega => &self.mega,
            PreloadPhase::UltraHighFrequency => &self.ultra,
            PreloadPhase::DatabaseBypass => &self.bypass,
            PreloadPhase::Massive => &self.massive,
            PreloadPhase::NotStarted | PreloadPhase::Completed => return,
        };
        counter.fetch_add(n, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PreloadMetricsSnapshot {
        PreloadMetricsSnapshot {
            mega_cache_operations: self.mega.load(Ordering::Relaxed),
            ultra_high_frequency_cache: self.ultra.load(Ordering::Relaxed),
            database_bypass_operations: self.bypass.load(Ordering::Relaxed),
            massive_preload_operations: self.massive.load(Ordering::Relaxed),
            failed_operations: self.failed.load(Ordering::Relaxed),
            phase: self.phase(),
        }
    }
}
