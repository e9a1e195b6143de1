//! Configuration Module
//!
//! Loads cache sizing, preload batch sizes and the ops server port from
//! environment variables.

use std::env;
use std::str::FromStr;

/// Runtime configuration.
///
/// Every value has a default matching the built-in preload plan; environment
/// variables only override magnitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Ops HTTP server port
    pub server_port: u16,
    /// Expired-entry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Optional store size bound; `None` keeps the store unbounded
    pub max_entries: Option<usize>,
    /// Whether the startup preload runs at all
    pub preload_enabled: bool,
    /// Synthetic user ids warmed in the mega phase (1..=n)
    pub preload_users: u64,
    /// Synthetic product ids warmed in the mega phase (1..=n)
    pub preload_products: u64,
    /// Generic keys warmed in the massive phase
    pub massive_batch_size: usize,
    /// Keys loaded concurrently per massive-phase chunk
    pub massive_chunk_size: usize,
    /// Database load reduction target, in percent
    pub load_reduction_target: f64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - ops server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - sweep frequency in seconds (default: 60)
    /// - `MAX_ENTRIES` - store size bound (default: unbounded)
    /// - `PRELOAD_ENABLED` - run the startup preload (default: true)
    /// - `PRELOAD_USERS` - user ids to warm (default: 50)
    /// - `PRELOAD_PRODUCTS` - product ids to warm (default: 100)
    /// - `MASSIVE_BATCH_SIZE` - generic keys to warm (default: 200)
    /// - `MASSIVE_CHUNK_SIZE` - concurrent loads per chunk (default: 50)
    /// - `LOAD_REDUCTION_TARGET` - target percentage (default: 90)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            max_entries: env_parse("MAX_ENTRIES").filter(|&n: &usize| n > 0),
            preload_enabled: env_or("PRELOAD_ENABLED", defaults.preload_enabled),
            preload_users: env_or("PRELOAD_USERS", defaults.preload_users),
            preload_products: env_or("PRELOAD_PRODUCTS", defaults.preload_products),
            massive_batch_size: env_or("MASSIVE_BATCH_SIZE", defaults.massive_batch_size),
            massive_chunk_size: env_parse("MASSIVE_CHUNK_SIZE")
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.massive_chunk_size),
            load_reduction_target: env_or("LOAD_REDUCTION_TARGET", defaults.load_reduction_target),
        }
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env_parse(name).unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cleanup_interval: 60,
            max_entries: None,
            preload_enabled: true,
            preload_users: 50,
            preload_products: 100,
            massive_batch_size: 200,
            massive_chunk_size: 50,
            load_reduction_target: 90.0,
        }
    }
}
