//! Decimal rounding helpers.

/// Slack absorbing binary representation error, so `1.005` rounds like the
/// decimal literal it was written as.
const REPRESENTATION_SLACK: f64 = 1e-9;

/// Rounds a non-negative value to `places` decimals, ties going up.
///
/// # Examples
///
/// ```
/// use repo_popularity::utils::rounding::round_half_up;
///
/// assert_eq!(round_half_up(3.3333, 2), 3.33);
/// assert_eq!(round_half_up(2.675, 2), 2.68);
/// ```
pub fn round_half_up(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    ((value * factor) + 0.5 + REPRESENTATION_SLACK).floor() / factor
}
