//! HTTP server initialization and runtime setup.
//!
//! Handles store construction, migrations, the Axum server lifecycle and
//! graceful shutdown.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::UrlStore;
use crate::infrastructure::persistence::{MemoryUrlStore, PgUrlStore, TimeoutUrlStore};
use crate::routes::normalized_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Builds the configured store, without the deadline wrapper.
///
/// For the postgres backend this opens the pool and applies migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or migrations fail.
pub async fn build_store(config: &Config) -> Result<Arc<dyn UrlStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryUrlStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set when STORE_BACKEND is 'postgres'")?;

            let store = PgUrlStore::connect(url, config.pool_settings())
                .await
                .context("Failed to connect to database")?;
            store.migrate().await.context("Failed to migrate")?;

            Ok(Arc::new(store))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The configured store, bounded by `STORE_TIMEOUT_MS`
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// Once a shutdown signal arrives, in-flight requests get
/// `SHUTDOWN_TIMEOUT_SECS` to finish before the server task is aborted.
/// The store is closed last.
///
/// # Errors
///
/// Returns an error if:
/// - Store construction fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let inner = build_store(&config).await?;
    let store: Arc<dyn UrlStore> =
        Arc::new(TimeoutUrlStore::new(inner.clone(), config.store_timeout()));

    let state = AppState::new(store);
    let app = normalized_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    let (signal_tx, signal_rx) = oneshot::channel();

    let mut server = tokio::spawn(async move {
        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = signal_tx.send(());
            })
            .await
    });

    let served = tokio::select! {
        result = &mut server => Some(result),
        Ok(()) = signal_rx => None,
    };

    let outcome: Result<()> = match served {
        Some(result) => result
            .context("Server task failed")
            .and_then(|served| served.map_err(Into::into)),
        None => {
            tracing::info!(
                timeout_secs = config.shutdown_timeout_secs,
                "Shutdown signal received, draining connections"
            );
            match tokio::time::timeout(config.shutdown_timeout(), &mut server).await {
                Ok(result) => result
                    .context("Server task failed")
                    .and_then(|served| served.map_err(Into::into)),
                Err(_) => {
                    tracing::warn!("Graceful shutdown timed out, aborting open connections");
                    server.abort();
                    Ok(())
                }
            }
        }
    };

    if let Err(e) = inner.close().await {
        tracing::warn!(error = %e, "Failed to close store");
    }
    tracing::info!("Server stopped");

    outcome
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
