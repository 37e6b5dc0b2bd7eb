//! cachelab - a consistency/latency trade-off demonstrator
//!
//! Serves the same data three ways (direct, TTL-cached, LRU-cached) so the
//! trade-off between freshness and latency is observable per request.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod source;
mod tasks;

use std::net::SocketAddr;

use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::spawn_sweep_task;

/// Main entry point for the cachelab service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct both cache engines and the seeded source store
/// 4. Start one background expiry sweep per engine
/// 5. Create the Axum router with all endpoints
/// 6. Start the HTTP server on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cachelab=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cachelab");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, ttl_capacity={}, lru_capacity={}, default_ttl={}s, cleanup_interval={}s, source_latency={}ms",
        config.server_port,
        config.ttl_capacity,
        config.lru_capacity,
        config.default_ttl,
        config.cleanup_interval,
        config.source_latency_ms
    );

    // Construct explicit engine and source instances; everything downstream
    // receives these handles, nothing reaches for process-wide state
    let state = AppState::from_config(&config);
    info!("Cache engines and source store initialized");

    // One sweep task per engine
    let sweep_handles = vec![
        spawn_sweep_task(state.ttl_cache.clone(), "ttl", config.cleanup_interval),
        spawn_sweep_task(state.lru_cache.clone(), "lru", config.cleanup_interval),
    ];
    info!("Expiry sweep tasks started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handles))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep tasks and allows graceful shutdown.
async fn shutdown_signal(sweep_handles: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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

    for handle in sweep_handles {
        handle.abort();
    }
    warn!("Sweep tasks aborted");
}
