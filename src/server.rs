//! HTTP server initialization and runtime setup.
//!
//! Builds the circuit breaker, GitHub client and service graph, then runs the
//! Axum server until Ctrl-C.

use crate::config::Config;
use crate::infrastructure::github::GithubClient;
use crate::infrastructure::resilience::CircuitBreaker;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds application state from configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_state(config: &Config) -> Result<AppState> {
    let breaker = Arc::new(CircuitBreaker::new(config.circuit_breaker_config()));
    let client = GithubClient::new(config.github_client_config(), breaker.clone())
        .context("Failed to build GitHub client")?;

    Ok(AppState::new(client, breaker))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The GitHub client cannot be built
/// - `LISTEN` is not a socket address or cannot be bound
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
