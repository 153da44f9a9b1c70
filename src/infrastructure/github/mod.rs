//! GitHub REST API integration.
//!
//! - [`GithubClient`] - [`crate::domain::search_client::RepositorySearch`] over `GET /search/repositories`
//! - [`model`] - Wire types of the search response

mod client;
pub mod model;

pub use client::{DEFAULT_API_BASE_URL, DEFAULT_USER_AGENT, GithubClient, GithubClientConfig};
