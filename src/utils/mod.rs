//! Small numeric helpers.
//!
//! - [`rounding`] - Decimal rounding for scores

pub mod rounding;
