//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /repos/popularity` - Ranked repository search
//! - `GET /health`           - Health check with upstream circuit state
//!
//! # Middleware
//!
//! - **Tracing** - One span per request with status and latency
//! - **Panic recovery** - A panicking handler answers 500 instead of dropping the connection
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{panic, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::api_routes())
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(panic::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
