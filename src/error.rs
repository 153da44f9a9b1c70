//! Application error type and its mapping to HTTP responses.
//!
//! [`AppError`] is the only error type that reaches the HTTP boundary. Its
//! [`IntoResponse`] implementation is the single place where failures become
//! status codes. Callers only ever see one of a fixed set of messages; upstream
//! detail goes to the log. The request span created by the tracing middleware
//! supplies the path, so log lines here carry it without repeating it.

use axum::extract::rejection::QueryRejection;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::domain::upstream_error::{UpstreamError, UpstreamErrorKind};

pub const MSG_INVALID_REQUEST: &str = "Invalid request. Please review your parameters.";
pub const MSG_RATE_LIMITED: &str = "GitHub rate limit reached. Try again later.";
pub const MSG_UPSTREAM_UNAVAILABLE: &str = "Temporary upstream issue. Please try again.";
pub const MSG_CIRCUIT_OPEN: &str = "Service temporarily unavailable. Please try again shortly.";
pub const MSG_INTERNAL: &str = "Something went wrong. Please try again.";

/// Error body returned for every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    /// HTTP reason phrase, e.g. `"Bad Gateway"`.
    pub error: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or out-of-range request parameters.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Any failure that has no more specific classification.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    /// Status code and caller-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, MSG_INVALID_REQUEST),
            AppError::Upstream(err) => match err.kind {
                UpstreamErrorKind::RateLimited => (StatusCode::TOO_MANY_REQUESTS, MSG_RATE_LIMITED),
                UpstreamErrorKind::ClientError => (StatusCode::BAD_REQUEST, MSG_INVALID_REQUEST),
                UpstreamErrorKind::ServerError | UpstreamErrorKind::Transport => {
                    (StatusCode::BAD_GATEWAY, MSG_UPSTREAM_UNAVAILABLE)
                }
                UpstreamErrorKind::CircuitOpen => {
                    (StatusCode::SERVICE_UNAVAILABLE, MSG_CIRCUIT_OPEN)
                }
            },
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL),
        }
    }

    /// Builds the response body for this error.
    pub fn to_error_response(&self) -> ErrorResponse {
        let (status, message) = self.status_and_message();
        ErrorResponse {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation(detail) => warn!("Bad request: {}", detail),
            AppError::Upstream(err) => {
                let upstream_status = err.http_status;
                match err.kind {
                    UpstreamErrorKind::RateLimited => {
                        warn!(?upstream_status, "Upstream rate limited: {}", err.message)
                    }
                    UpstreamErrorKind::ClientError => warn!(
                        ?upstream_status,
                        "Upstream 4xx mapped to 400: {}", err.message
                    ),
                    UpstreamErrorKind::CircuitOpen => {
                        error!("Circuit open, upstream call not attempted")
                    }
                    UpstreamErrorKind::ServerError | UpstreamErrorKind::Transport => error!(
                        ?upstream_status,
                        kind = %err.kind,
                        "Upstream error: {}", err.message
                    ),
                }
            }
            AppError::Internal(detail) => error!("Unhandled error: {}", detail),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let body = self.to_error_response();
        let (status, _) = self.status_and_message();
        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request(errors.to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}
