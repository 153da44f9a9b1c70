//! API route configuration.

use crate::api::handlers::popularity_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public API routes.
///
/// # Endpoints
///
/// - `GET /repos/popularity` - GitHub search ranked by popularity score
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/repos/popularity", get(popularity_handler))
}
