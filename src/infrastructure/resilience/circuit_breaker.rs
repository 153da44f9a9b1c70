//! Count-based circuit breaker guarding the upstream endpoint.
//!
//! One instance is shared by every request through an `Arc`. All state lives
//! behind a single mutex, so transitions are observed in a consistent order.
//!
//! # State Machine
//!
//! ```text
//!            failure rate >= threshold
//!   Closed ─────────────────────────────▶ Open
//!     ▲                                    │ cooldown elapsed
//!     │ trial succeeds                     ▼
//!     └────────────────────────────── Half-Open ── trial fails ──▶ Open
//! ```
//!
//! [`CircuitBreaker::allow`] hands out an [`Admission`] that the caller passes
//! back to [`CircuitBreaker::record_outcome`]. Each half-open trial carries a
//! fresh generation, so only the outcome of the current trial moves the
//! breaker out of Half-Open.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{info, warn};

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::HalfOpen => "half_open",
        }
    }
}

/// Thresholds controlling when the breaker trips and recovers.
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Failure percentage (1..=100) at which a closed breaker opens.
    pub failure_rate_threshold: u8,
    /// Number of most recent outcomes considered.
    pub sliding_window_size: usize,
    /// Outcomes required before the failure rate is evaluated.
    pub minimum_calls: usize,
    /// Time an open breaker waits before admitting a trial call.
    pub open_cooldown: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_rate_threshold: 50,
            sliding_window_size: 10,
            minimum_calls: 5,
            open_cooldown: Duration::from_secs(30),
        }
    }
}

/// Ticket returned by [`CircuitBreaker::allow`], handed back with the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Call admitted by a closed breaker.
    Regular,
    /// Half-open trial call, tagged with its generation.
    Trial(u64),
}

#[derive(Debug)]
enum Phase {
    Closed,
    Open { since: Instant },
    HalfOpen { trial: u64, started: Instant },
}

#[derive(Debug)]
struct Inner {
    phase: Phase,
    /// Most recent outcomes, `true` meaning failure.
    window: VecDeque<bool>,
    failures: usize,
    /// Generation of the most recent half-open trial.
    trials: u64,
}

/// Shared guard that fails fast after sustained upstream failure.
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        let window = VecDeque::with_capacity(config.sliding_window_size);
        Self {
            config,
            inner: Mutex::new(Inner {
                phase: Phase::Closed,
                window,
                failures: 0,
                trials: 0,
            }),
        }
    }

    /// Admits a call, or returns `None` when it must fail fast.
    ///
    /// An open breaker whose cooldown has elapsed moves to half-open and
    /// admits exactly one trial. A trial that never reports back (for
    /// example because its request was cancelled) is superseded after
    /// another cooldown.
    pub fn allow(&self) -> Option<Admission> {
        let now = Instant::now();
        let mut guard = self.lock();
        let inner = &mut *guard;

        match inner.phase {
            Phase::Closed => Some(Admission::Regular),
            Phase::Open { since } => {
                if now.duration_since(since) >= self.config.open_cooldown {
                    transition(CircuitState::HalfOpen);
                    Some(inner.start_trial(now))
                } else {
                    None
                }
            }
            Phase::HalfOpen { started, .. } => {
                if now.duration_since(started) >= self.config.open_cooldown {
                    Some(inner.start_trial(now))
                } else {
                    None
                }
            }
        }
    }

    /// Records the outcome of a call previously admitted by [`Self::allow`].
    ///
    /// While half-open only the current trial decides the next state; other
    /// outcomes (regular calls admitted before the breaker opened, superseded
    /// trials) are dropped.
    pub fn record_outcome(&self, admission: Admission, success: bool) {
        let mut guard = self.lock();
        let inner = &mut *guard;

        match inner.phase {
            Phase::Closed => {
                inner.push(!success, self.config.sliding_window_size);
                if self.should_trip(inner) {
                    warn!(
                        failures = inner.failures,
                        window = inner.window.len(),
                        "Circuit breaker opened"
                    );
                    inner.open();
                }
            }
            Phase::HalfOpen { trial, .. } => {
                if admission != Admission::Trial(trial) {
                    return;
                }
                if success {
                    info!("Circuit breaker closed after successful trial call");
                    inner.window.clear();
                    inner.failures = 0;
                    inner.phase = Phase::Closed;
                    transition(CircuitState::Closed);
                } else {
                    warn!("Circuit breaker trial call failed, reopening");
                    inner.open();
                }
            }
            // Late outcome of a call admitted before the breaker (re)opened.
            Phase::Open { .. } => {}
        }
    }

    /// Current state, for health reporting.
    pub fn state(&self) -> CircuitState {
        match self.lock().phase {
            Phase::Closed => CircuitState::Closed,
            Phase::Open { .. } => CircuitState::Open,
            Phase::HalfOpen { .. } => CircuitState::HalfOpen,
        }
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    fn should_trip(&self, inner: &Inner) -> bool {
        let calls = inner.window.len();
        if calls < self.config.minimum_calls.max(1) {
            return false;
        }
        inner.failures * 100 >= usize::from(self.config.failure_rate_threshold) * calls
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Bookkeeping never panics midway; a poisoned lock still holds consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }
}

impl Inner {
    fn push(&mut self, failure: bool, capacity: usize) {
        if self.window.len() >= capacity.max(1)
            && let Some(evicted) = self.window.pop_front()
            && evicted
        {
            self.failures -= 1;
        }
        self.window.push_back(failure);
        if failure {
            self.failures += 1;
        }
    }

    fn start_trial(&mut self, now: Instant) -> Admission {
        self.trials += 1;
        self.phase = Phase::HalfOpen {
            trial: self.trials,
            started: now,
        };
        Admission::Trial(self.trials)
    }

    fn open(&mut self) {
        self.phase = Phase::Open {
            since: Instant::now(),
        };
        transition(CircuitState::Open);
    }
}

fn transition(to: CircuitState) {
    metrics::counter!("circuit_breaker_transitions_total", "to" => to.as_str()).increment(1);
}
