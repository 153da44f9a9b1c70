//! Resilience primitives applied to upstream calls.
//!
//! - [`CircuitBreaker`] - Process-wide guard failing fast after sustained failure
//! - [`RetryPolicy`] - Bounded, capped exponential backoff for retryable failures

mod circuit_breaker;
mod retry;

pub use circuit_breaker::{Admission, CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use retry::RetryPolicy;
