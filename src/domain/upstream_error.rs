//! Typed failure of an upstream search call.

use std::fmt;

/// Classification of an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamErrorKind {
    /// Quota exhausted: HTTP 429, or 403 with a rate-limit body.
    RateLimited,
    /// Any other 4xx.
    ClientError,
    /// 5xx or an otherwise unusable status.
    ServerError,
    /// The circuit breaker refused the call; nothing was sent.
    CircuitOpen,
    /// No usable response: connect failure, timeout, unreadable body.
    Transport,
}

impl UpstreamErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
            Self::CircuitOpen => "circuit_open",
            Self::Transport => "transport",
        }
    }
}

impl fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified upstream failure.
///
/// Produced by the upstream client and converted to an HTTP response only at
/// the API boundary. `message` may contain upstream detail and must never be
/// returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("upstream {kind} (status: {}): {message}", status_label(.http_status))]
pub struct UpstreamError {
    pub kind: UpstreamErrorKind,
    pub http_status: Option<u16>,
    pub message: String,
}

impl UpstreamError {
    pub fn new(
        kind: UpstreamErrorKind,
        http_status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            http_status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Transport, None, message)
    }

    pub fn circuit_open() -> Self {
        Self::new(UpstreamErrorKind::CircuitOpen, None, "circuit breaker is open")
    }

    /// Classifies a non-success HTTP response.
    ///
    /// A 403 is treated as rate limiting when its body mentions "rate limit"
    /// in any letter case; other 403s are permission errors.
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            429 => UpstreamErrorKind::RateLimited,
            403 if mentions_rate_limit(body) => UpstreamErrorKind::RateLimited,
            400..=499 => UpstreamErrorKind::ClientError,
            _ => UpstreamErrorKind::ServerError,
        };

        Self::new(kind, Some(status), truncate(body, MAX_MESSAGE_LEN))
    }

    /// Whether another attempt with identical parameters may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            UpstreamErrorKind::ServerError | UpstreamErrorKind::Transport
        )
    }

    /// Whether the failure says something about upstream availability.
    pub fn is_availability_failure(&self) -> bool {
        self.is_retryable()
    }
}

const MAX_MESSAGE_LEN: usize = 512;

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}

fn mentions_rate_limit(body: &str) -> bool {
    body.to_lowercase().contains("rate limit")
}

fn truncate(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
