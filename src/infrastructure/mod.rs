//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! the concrete upstream client and the resilience machinery around it.
//!
//! # Modules
//!
//! - [`github`] - GitHub search client implementing [`crate::domain::search_client::RepositorySearch`]
//! - [`resilience`] - Circuit breaker and retry policy

pub mod github;
pub mod resilience;
