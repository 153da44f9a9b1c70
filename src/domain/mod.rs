//! Domain layer containing business entities and logic.
//!
//! This module holds the pure parts of the service: the data model, the
//! popularity scoring function, query construction and the contract of the
//! upstream search. Nothing here performs I/O.
//!
//! # Architecture
//!
//! - [`entities`] - Request-scoped data structures
//! - [`scoring`] - Popularity score from stars, forks and recency
//! - [`query_builder`] - Upstream query string from optional filters
//! - [`search_client`] - Upstream search trait implemented by infrastructure
//! - [`upstream_error`] - Typed upstream failure
//!
//! # Request Flow
//!
//! 1. HTTP handler turns query parameters into a [`entities::SearchFilter`]
//! 2. [`query_builder::build`] produces the upstream query
//! 3. [`search_client::RepositorySearch`] fetches one page
//! 4. Every item is scored by [`scoring::score`] against one shared `now`

pub mod entities;
pub mod query_builder;
pub mod scoring;
pub mod search_client;
pub mod upstream_error;
