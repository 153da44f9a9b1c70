mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use common::{FUTURE, create_test_state, repo_json, search_body};
use mockito::Matcher;
use repo_popularity::routes::app_router;
use tower::ServiceExt;

async fn call(state_url: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = app_router(create_test_state(state_url));
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

#[tokio::test]
async fn test_health_with_trailing_slash() {
    let (status, json) = call("http://127.0.0.1:1", "/health/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_search_with_trailing_slash_keeps_query() {
    let mut github = mockito::Server::new_async().await;
    let mock = github
        .mock("GET", "/search/repositories")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "language:Rust".into()),
            Matcher::UrlEncoded("per_page".into(), "5".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(1, vec![repo_json(9, 1, 1, FUTURE)]))
        .expect(1)
        .create_async()
        .await;

    let (status, json) = call(
        &github.url(),
        "/repos/popularity/?language=Rust&per_page=5",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["items"][0]["id"], 9);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_query_through_full_stack() {
    let (status, json) = call("http://127.0.0.1:1", "/repos/popularity?page=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = call("http://127.0.0.1:1", "/repos").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
