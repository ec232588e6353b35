//! User API - A small REST service for user records
//!
//! Stores each user as a Redis hash and exposes CRUD endpoints over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_api::api::{create_router, AppState};
use user_api::config::{Config, StoreBackend};
use user_api::store::{KvStore, MemoryStore, RedisStore, RetryPolicy};

/// Main entry point for the user API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to the store (with retry)
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. On SIGINT/SIGTERM: drain requests, then close the store connection
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let started_at = Instant::now();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting User API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, store={:?}, redis={}:{}, public_dir={}",
        config.server_port,
        config.store_backend,
        config.redis_host,
        config.redis_port,
        config.public_dir.display()
    );

    let store: Arc<dyn KvStore> = match config.store_backend {
        StoreBackend::Redis => Arc::new(
            RedisStore::connect(&config.redis_url(), RetryPolicy::default())
                .await
                .context("Failed to connect to Redis")?,
        ),
        StoreBackend::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::from_arc(store.clone())
        .with_started_at(started_at)
        .with_public_dir(&config.public_dir);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Err(err) = store.close().await {
        warn!(error = %err, "Failed to close store connection cleanly");
    }

    info!("Server closed");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
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
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, closing server...");
        }
        _ = terminate => {
            info!("SIGTERM received, closing server...");
        }
    }
}
