#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use repo_popularity::api::handlers::{health_handler, popularity_handler};
use repo_popularity::config::Config;
use repo_popularity::infrastructure::resilience::Admission;
use repo_popularity::server::build_state;
use repo_popularity::state::AppState;

/// Items dated far in the future score with full recency (days = 0).
pub const FUTURE: &str = "2999-01-01T00:00:00Z";

/// Configuration pointing at a fake GitHub with near-zero backoff.
pub fn test_config(base_url: &str) -> Config {
    Config {
        github_api_base_url: base_url.to_string(),
        github_timeout_ms: 2_000,
        retry_backoff_ms: 1,
        retry_max_backoff_ms: 2,
        ..Config::default()
    }
}

pub fn create_test_state(base_url: &str) -> AppState {
    build_state(&test_config(base_url)).unwrap()
}

pub fn create_test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/repos/popularity", get(popularity_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

pub fn repo_json(id: i64, stars: u32, forks: u32, updated_at: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "full_name": format!("owner/repo-{id}"),
        "html_url": format!("https://github.com/owner/repo-{id}"),
        "language": "Rust",
        "stargazers_count": stars,
        "forks_count": forks,
        "updated_at": updated_at,
        "description": "ignored field",
    })
}

pub fn search_body(total_count: i64, items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "total_count": total_count,
        "incomplete_results": false,
        "items": items,
    })
    .to_string()
}

/// Feeds enough failures into the breaker to open it.
pub fn trip_breaker(state: &AppState) {
    let calls = state.circuit_breaker.config().minimum_calls;
    for _ in 0..calls {
        state.circuit_breaker.record_outcome(Admission::Regular, false);
    }
}
