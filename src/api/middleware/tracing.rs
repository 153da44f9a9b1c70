//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates the per-request tracing layer.
///
/// Opens an `INFO` span carrying method, URI and HTTP version, so anything
/// logged while handling the request (upstream failures included) is
/// attributed to its path. The response is logged with status and latency
/// in milliseconds.
///
/// ```text
/// INFO request{method=GET uri=/repos/popularity?language=Rust version=HTTP/1.1}: finished processing request latency=231 ms status=200
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
