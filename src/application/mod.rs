//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations: it builds the upstream query,
//! calls the search client through its trait and ranks the result. Services
//! consume domain traits and provide a clean API for HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::popularity_service::PopularityService`] - Ranked repository search

pub mod services;
