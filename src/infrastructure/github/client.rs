//! GitHub repository search client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use tokio_retry::RetryIf;
use tracing::{debug, warn};

use super::model::SearchResponse;
use crate::domain::entities::SearchPage;
use crate::domain::search_client::RepositorySearch;
use crate::domain::upstream_error::UpstreamError;
use crate::infrastructure::resilience::{CircuitBreaker, RetryPolicy};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = concat!("repo-popularity/", env!("CARGO_PKG_VERSION"));

const GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const SEARCH_PATH: &str = "/search/repositories";

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct GithubClientConfig {
    pub base_url: String,
    /// Bearer token; `None` or blank sends unauthenticated requests.
    pub token: Option<String>,
    pub user_agent: String,
    /// Whole-request timeout, connect through body.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for GithubClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

/// Upstream adapter for `GET /search/repositories`.
///
/// Every attempt passes the shared [`CircuitBreaker`] first and reports its
/// outcome back. Server errors and transport failures are retried according
/// to the [`RetryPolicy`]; everything else is returned immediately.
///
/// Retries run inside the caller's future: dropping it abandons in-flight
/// requests and pending retries.
pub struct GithubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    user_agent: String,
    retry: RetryPolicy,
    breaker: Arc<CircuitBreaker>,
}

impl GithubClient {
    /// Builds the client and its connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(config: GithubClientConfig, breaker: Arc<CircuitBreaker>) -> reqwest::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        let token = config
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            user_agent: config.user_agent,
            retry: config.retry,
            breaker,
        })
    }

    /// Runs one attempt through the circuit breaker.
    async fn attempt(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<SearchPage, UpstreamError> {
        let Some(admission) = self.breaker.allow() else {
            record_request("circuit_open");
            return Err(UpstreamError::circuit_open());
        };

        let result = self.send(query, per_page, page).await;

        let healthy = match &result {
            Ok(_) => true,
            Err(err) => !err.is_availability_failure(),
        };
        self.breaker.record_outcome(admission, healthy);

        match &result {
            Ok(_) => record_request("success"),
            Err(err) => record_request(err.kind.as_str()),
        }

        result
    }

    async fn send(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<SearchPage, UpstreamError> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);

        let mut request = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .query(&[("per_page", per_page), ("page", page)])
            .header(ACCEPT, GITHUB_JSON)
            .header(API_VERSION_HEADER, API_VERSION)
            .header(USER_AGENT, &self.user_agent);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::transport(format!("request failed: {e}")))?;

        let status = response.status();
        debug!(status = status.as_u16(), %query, per_page, page, "GitHub search responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::from_status(status.as_u16(), &body));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::transport(format!("unreadable search response: {e}")))?;

        Ok(body.into())
    }
}

#[async_trait]
impl RepositorySearch for GithubClient {
    async fn search(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<SearchPage, UpstreamError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut failed_attempts = 0u32;

        RetryIf::start(
            self.retry.delays(),
            || self.attempt(query, per_page, page),
            |err: &UpstreamError| {
                failed_attempts += 1;
                let retry = err.is_retryable() && failed_attempts < max_attempts;
                if retry {
                    warn!(
                        attempt = failed_attempts,
                        max_attempts,
                        error = %err,
                        "GitHub search failed, retrying"
                    );
                }
                retry
            },
        )
        .await
    }
}

fn record_request(outcome: &'static str) {
    metrics::counter!("upstream_requests_total", "outcome" => outcome).increment(1);
}
