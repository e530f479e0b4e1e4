//! Joke API - A joke-serving REST API
//!
//! Serves, searches, rates and edits jokes behind an in-memory response cache.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use joke_api::{api::create_router, spawn_cleanup_task, AppState, Config, JokeStore};

/// Main entry point for the joke API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Load the joke store from the seed file, if one is configured
/// 4. Create the response cache and start the background cleanup task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "joke_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Joke API server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, default_ttl={}ms, random_ttl={}ms, joke_ttl={}ms, types_ttl={}ms, cleanup_interval={}s",
        config.server_port,
        config.default_ttl_ms,
        config.ttls.random_ms,
        config.ttls.joke_ms,
        config.ttls.types_ms,
        config.cleanup_interval
    );

    let jokes = match &config.jokes_path {
        Some(path) => JokeStore::load(path)?,
        None => {
            warn!("JOKES_PATH not set, starting with an empty joke store");
            JokeStore::default()
        }
    };

    let state = AppState::from_config(&config, jokes);
    info!("Response cache initialized");

    let cleanup_interval = Duration::from_secs(config.cleanup_interval.max(1));
    let cleanup_handle = spawn_cleanup_task(state.cache.clone(), cleanup_interval);
    info!("Background cleanup task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
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

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
