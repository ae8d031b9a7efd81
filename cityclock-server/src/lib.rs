//! HTTP server and command-line front end for `cityclock`.
//!
//! This crate focuses on:
//! - Routing and JSON error mapping
//! - Logging bootstrap
//! - CLI parsing and interactive configuration

use std::sync::Arc;

use anyhow::Context;
use cityclock_core::{CityService, Config};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub mod cli;
pub mod routes;

pub use routes::{AppState, router};

const DEFAULT_LOG_FILTER: &str = "cityclock=info,cityclock_core=info,cityclock_server=info";

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Bind `config.listen_addr()` and serve until Ctrl-C.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let service = CityService::from_config(config)?;
    let addr = config.listen_addr();

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        address = %listener.local_addr()?,
        weather = %service.weather_mode(),
        "Server running"
    );

    serve(listener, Arc::new(service)).await
}

pub async fn serve(listener: TcpListener, service: AppState) -> anyhow::Result<()> {
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
