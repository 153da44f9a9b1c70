//! HTTP middleware for request processing.

pub mod panic;
pub mod tracing;
