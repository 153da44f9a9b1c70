//! Upstream repository search contract.

use async_trait::async_trait;

use crate::domain::entities::SearchPage;
use crate::domain::upstream_error::UpstreamError;

/// Searches the upstream repository index.
///
/// # Implementations
///
/// - [`crate::infrastructure::github::GithubClient`] - GitHub REST search with retry and circuit breaker
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositorySearch: Send + Sync {
    /// Fetches one page of repositories matching `query`.
    ///
    /// `per_page` must be within `1..=100` and `page` at least 1; callers
    /// validate both before calling.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] classified by the implementation. Retryable
    /// failures are only returned once the retry budget is exhausted.
    async fn search(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<SearchPage, UpstreamError>;
}
