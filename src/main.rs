//! Market Cache - ops server for the in-process marketplace cache
//!
//! Builds the process-wide cache, kicks off the startup preload and serves
//! the internal stats/invalidation endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use market_cache::api::create_router;
use market_cache::{spawn_cleanup_task, AppState, Config, PlaceholderSource};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and an idle preload orchestrator
/// 4. Start background expiry sweep
/// 5. Start the preload (returns immediately)
/// 6. Serve the ops router on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Market Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={:?}, port={}, cleanup_interval={}s, preload_enabled={}",
        config.max_entries, config.server_port, config.cleanup_interval, config.preload_enabled
    );

    let state = AppState::from_config(&config, Arc::new(PlaceholderSource));
    info!("Cache initialized");

    let mut background: Vec<JoinHandle<()>> = Vec::new();
    background.push(spawn_cleanup_task(
        state.cache.clone(),
        config.cleanup_interval,
    ));

    if config.preload_enabled {
        background.push(state.preloader.start()?);
        info!("Cache preload scheduled");
    } else {
        info!("Cache preload disabled");
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Ops server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(background))
        .await
        .context("ops server failed")?;

    info!("Shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM, then aborts the background tasks.
async fn shutdown_signal(background: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    for handle in background {
        handle.abort();
    }
    warn!("Background tasks aborted");
}
