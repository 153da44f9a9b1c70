//! Retry policy for idempotent upstream calls.

use std::time::Duration;

use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// How many times, and how patiently, a failed call is repeated.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first one. `1` disables retries.
    pub max_attempts: u32,
    /// Backoff unit: the n-th retry waits up to `backoff × 2ⁿ`.
    pub backoff: Duration,
    /// Upper bound for a single wait.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Policy performing a single attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delays between consecutive attempts, one per retry.
    ///
    /// Exponential with full jitter and capped at `max_backoff`, so the total
    /// added latency stays bounded by `(max_attempts - 1) × max_backoff`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let unit = u64::try_from(self.backoff.as_millis()).unwrap_or(u64::MAX);
        let retries = self.max_attempts.saturating_sub(1) as usize;

        ExponentialBackoff::from_millis(2)
            .factor(unit)
            .max_delay(self.max_backoff)
            .map(jitter)
            .take(retries)
    }
}
