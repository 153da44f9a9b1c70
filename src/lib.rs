//! # Repository Popularity
//!
//! A small HTTP service that searches GitHub repositories and re-ranks each
//! page by a local popularity score blending stars, forks and update recency.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, scoring, query construction, search contract
//! - **Application Layer** ([`application`]) - Search, scoring and ranking orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - GitHub client, retry and circuit breaker
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Scoring
//!
//! ```text
//! recency = 100 / (1 + days_since_update / 30)
//! score   = round(0.6 * stars + 0.3 * forks + 0.1 * recency, 2)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export GITHUB_TOKEN="ghp_..."   # Optional, raises the GitHub rate limit
//! cargo run
//! curl 'http://localhost:8080/repos/popularity?language=Rust&per_page=10'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::PopularityService;
    pub use crate::domain::entities::{PopularityResult, ScoredRepository, SearchFilter};
    pub use crate::domain::search_client::RepositorySearch;
    pub use crate::domain::upstream_error::{UpstreamError, UpstreamErrorKind};
    pub use crate::error::AppError;
    pub use crate::infrastructure::github::{GithubClient, GithubClientConfig};
    pub use crate::infrastructure::resilience::{
        Admission, CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryPolicy,
    };
    pub use crate::state::AppState;
}
