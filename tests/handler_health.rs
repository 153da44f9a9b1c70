mod common;

use axum::http::StatusCode;
use common::{create_test_server, create_test_state, trip_breaker};

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = create_test_server(create_test_state("http://127.0.0.1:1"));

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["upstream_circuit"]["status"], "ok");
    assert_eq!(json["checks"]["upstream_circuit"]["message"], "closed");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = create_test_server(create_test_state("http://127.0.0.1:1"));

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["checks"].get("upstream_circuit").is_some());
}

#[tokio::test]
async fn test_health_reports_open_circuit() {
    let state = create_test_state("http://127.0.0.1:1");
    trip_breaker(&state);
    let server = create_test_server(state);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["upstream_circuit"]["status"], "error");
    assert_eq!(json["checks"]["upstream_circuit"]["message"], "open");
}
