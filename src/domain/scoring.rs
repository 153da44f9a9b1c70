//! Popularity scoring.
//!
//! A repository's score blends stars, forks and how recently it was updated:
//!
//! ```text
//! days    = max(0, whole days between updated_at and now)
//! recency = 100 / (1 + days / 30)
//! score   = round_half_up(0.6 * stars + 0.3 * forks + 0.1 * recency, 2)
//! ```
//!
//! The reference `now` is always supplied by the caller, so one request can
//! score a whole batch against the same instant.

use chrono::{DateTime, Utc};

use crate::utils::rounding::round_half_up;

pub const STARS_WEIGHT: f64 = 0.6;
pub const FORKS_WEIGHT: f64 = 0.3;
pub const RECENCY_WEIGHT: f64 = 0.1;

/// Days after which recency has decayed to half.
pub const RECENCY_HALF_LIFE_DAYS: f64 = 30.0;

const MAX_RECENCY: f64 = 100.0;
const SCORE_DECIMALS: u32 = 2;

/// Freshness signal in `(0, 100]`.
///
/// An `updated_at` in the future counts as updated just now.
pub fn recency(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days = (now - updated_at).num_days().max(0) as f64;
    MAX_RECENCY * (1.0 / (1.0 + days / RECENCY_HALF_LIFE_DAYS))
}

/// Computes the popularity score, rounded to two decimals.
pub fn score(stars: u32, forks: u32, updated_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let raw = STARS_WEIGHT * f64::from(stars)
        + FORKS_WEIGHT * f64::from(forks)
        + RECENCY_WEIGHT * recency(updated_at, now);

    round_half_up(raw, SCORE_DECIMALS)
}
