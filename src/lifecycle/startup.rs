//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::routes;
use crate::routing::RoutingError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid {field} `{value}`")]
    Address { field: &'static str, value: String },

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("route registration failed: {0}")]
    Routes(#[from] RoutingError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Serve the app with a validated configuration until SIGINT/SIGTERM.
///
/// Logging must already be initialized.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let signal = signals::wait_for_signal().await;
        shutdown.trigger(signal);
    });

    serve(config, server_shutdown).await
}

/// Serve the app until `shutdown` fires.
pub async fn serve(
    config: AppConfig,
    shutdown: tokio::sync::broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = parse_addr(
            "observability.metrics_address",
            &config.observability.metrics_address,
        )?;
        metrics::init_metrics(addr)?;
    }

    let table = routes::app_routes()?;
    for entry in table.manifest() {
        tracing::info!(route = %entry.id, path = %entry.path, "Route mounted");
    }

    let addr = parse_addr("listener.bind_address", &config.listener.bind_address)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    HttpServer::new(config, table).run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn parse_addr(field: &'static str, value: &str) -> Result<SocketAddr, StartupError> {
    value.parse().map_err(|_| StartupError::Address {
        field,
        value: value.to_string(),
    })
}
