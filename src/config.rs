//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! A `.env` file in the working directory is honored (loaded by `main`).
//!
//! ## Variables
//!
//! All variables are optional.
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `GITHUB_API_BASE_URL` - GitHub REST API root (default: `https://api.github.com`)
//! - `GITHUB_TOKEN` - Bearer token; unauthenticated requests if unset or blank
//! - `GITHUB_USER_AGENT` - `User-Agent` header (default: `repo-popularity/<version>`)
//! - `GITHUB_TIMEOUT_MS` - Per-request timeout (default: 5000)
//! - `GITHUB_RETRY_MAX_ATTEMPTS` - Total attempts per search, 1..=10 (default: 3)
//! - `GITHUB_RETRY_BACKOFF_MS` - Backoff unit (default: 100)
//! - `GITHUB_RETRY_MAX_BACKOFF_MS` - Cap for a single backoff (default: 2000)
//! - `CIRCUIT_FAILURE_RATE_THRESHOLD` - Failure percentage that opens the circuit, 1..=100 (default: 50)
//! - `CIRCUIT_SLIDING_WINDOW_SIZE` - Outcomes considered (default: 10)
//! - `CIRCUIT_MINIMUM_CALLS` - Outcomes required before evaluating (default: 5)
//! - `CIRCUIT_OPEN_COOLDOWN_SECS` - Wait before a trial call (default: 30)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::github::{DEFAULT_API_BASE_URL, DEFAULT_USER_AGENT, GithubClientConfig};
use crate::infrastructure::resilience::{CircuitBreakerConfig, RetryPolicy};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,

    // ── GitHub client ───────────────────────────────────────────────────────
    pub github_api_base_url: String,
    pub github_token: Option<String>,
    pub github_user_agent: String,
    pub github_timeout_ms: u64,
    pub retry_max_attempts: u32,
    pub retry_backoff_ms: u64,
    pub retry_max_backoff_ms: u64,

    // ── Circuit breaker ─────────────────────────────────────────────────────
    pub circuit_failure_rate_threshold: u8,
    pub circuit_sliding_window_size: usize,
    pub circuit_minimum_calls: usize,
    pub circuit_open_cooldown_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            github_api_base_url: DEFAULT_API_BASE_URL.to_string(),
            github_token: None,
            github_user_agent: DEFAULT_USER_AGENT.to_string(),
            github_timeout_ms: 5_000,
            retry_max_attempts: 3,
            retry_backoff_ms: 100,
            retry_max_backoff_ms: 2_000,
            circuit_failure_rate_threshold: 50,
            circuit_sliding_window_size: 10,
            circuit_minimum_calls: 5,
            circuit_open_cooldown_secs: 30,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let github_token = env::var("GITHUB_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            listen_addr: env::var("LISTEN").unwrap_or(defaults.listen_addr),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
            github_api_base_url: env::var("GITHUB_API_BASE_URL")
                .unwrap_or(defaults.github_api_base_url),
            github_token,
            github_user_agent: env::var("GITHUB_USER_AGENT")
                .unwrap_or(defaults.github_user_agent),
            github_timeout_ms: parse_var("GITHUB_TIMEOUT_MS", defaults.github_timeout_ms)?,
            retry_max_attempts: parse_var("GITHUB_RETRY_MAX_ATTEMPTS", defaults.retry_max_attempts)?,
            retry_backoff_ms: parse_var("GITHUB_RETRY_BACKOFF_MS", defaults.retry_backoff_ms)?,
            retry_max_backoff_ms: parse_var(
                "GITHUB_RETRY_MAX_BACKOFF_MS",
                defaults.retry_max_backoff_ms,
            )?,
            circuit_failure_rate_threshold: parse_var(
                "CIRCUIT_FAILURE_RATE_THRESHOLD",
                defaults.circuit_failure_rate_threshold,
            )?,
            circuit_sliding_window_size: parse_var(
                "CIRCUIT_SLIDING_WINDOW_SIZE",
                defaults.circuit_sliding_window_size,
            )?,
            circuit_minimum_calls: parse_var(
                "CIRCUIT_MINIMUM_CALLS",
                defaults.circuit_minimum_calls,
            )?,
            circuit_open_cooldown_secs: parse_var(
                "CIRCUIT_OPEN_COOLDOWN_SECS",
                defaults.circuit_open_cooldown_secs,
            )?,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let base_url = url::Url::parse(&self.github_api_base_url).with_context(|| {
            format!(
                "GITHUB_API_BASE_URL is not a valid URL: '{}'",
                self.github_api_base_url
            )
        })?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            anyhow::bail!(
                "GITHUB_API_BASE_URL must use http or https, got '{}'",
                self.github_api_base_url
            );
        }

        if self.github_user_agent.trim().is_empty() {
            anyhow::bail!("GITHUB_USER_AGENT must not be empty");
        }

        if self.github_timeout_ms == 0 {
            anyhow::bail!("GITHUB_TIMEOUT_MS must be greater than 0");
        }

        if !(1..=10).contains(&self.retry_max_attempts) {
            anyhow::bail!(
                "GITHUB_RETRY_MAX_ATTEMPTS must be between 1 and 10, got {}",
                self.retry_max_attempts
            );
        }

        if self.retry_max_backoff_ms < self.retry_backoff_ms {
            anyhow::bail!(
                "GITHUB_RETRY_MAX_BACKOFF_MS ({}) must not be lower than GITHUB_RETRY_BACKOFF_MS ({})",
                self.retry_max_backoff_ms,
                self.retry_backoff_ms
            );
        }

        if !(1..=100).contains(&self.circuit_failure_rate_threshold) {
            anyhow::bail!(
                "CIRCUIT_FAILURE_RATE_THRESHOLD must be between 1 and 100, got {}",
                self.circuit_failure_rate_threshold
            );
        }

        if self.circuit_sliding_window_size == 0 {
            anyhow::bail!("CIRCUIT_SLIDING_WINDOW_SIZE must be at least 1");
        }

        if self.circuit_minimum_calls == 0
            || self.circuit_minimum_calls > self.circuit_sliding_window_size
        {
            anyhow::bail!(
                "CIRCUIT_MINIMUM_CALLS must be between 1 and CIRCUIT_SLIDING_WINDOW_SIZE ({}), got {}",
                self.circuit_sliding_window_size,
                self.circuit_minimum_calls
            );
        }

        if self.circuit_open_cooldown_secs == 0 {
            anyhow::bail!("CIRCUIT_OPEN_COOLDOWN_SECS must be greater than 0");
        }

        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts,
            backoff: Duration::from_millis(self.retry_backoff_ms),
            max_backoff: Duration::from_millis(self.retry_max_backoff_ms),
        }
    }

    pub fn github_client_config(&self) -> GithubClientConfig {
        GithubClientConfig {
            base_url: self.github_api_base_url.clone(),
            token: self.github_token.clone(),
            user_agent: self.github_user_agent.clone(),
            timeout: Duration::from_millis(self.github_timeout_ms),
            retry: self.retry_policy(),
        }
    }

    pub fn circuit_breaker_config(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_rate_threshold: self.circuit_failure_rate_threshold,
            sliding_window_size: self.circuit_sliding_window_size,
            minimum_calls: self.circuit_minimum_calls,
            open_cooldown: Duration::from_secs(self.circuit_open_cooldown_secs),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  GitHub API: {}", self.github_api_base_url);

        match &self.github_token {
            Some(token) => tracing::info!("  GitHub token: {}", mask_secret(token)),
            None => tracing::info!("  GitHub token: none (unauthenticated)"),
        }

        tracing::info!("  User agent: {}", self.github_user_agent);
        tracing::info!("  Timeout: {}ms", self.github_timeout_ms);
        tracing::info!(
            "  Retry: {} attempts, backoff {}ms (max {}ms)",
            self.retry_max_attempts,
            self.retry_backoff_ms,
            self.retry_max_backoff_ms
        );
        tracing::info!(
            "  Circuit breaker: {}% of last {} calls (min {}), cooldown {}s",
            self.circuit_failure_rate_threshold,
            self.circuit_sliding_window_size,
            self.circuit_minimum_calls,
            self.circuit_open_cooldown_secs
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses an optional environment variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Masks a secret for logging, keeping only a short prefix.
///
/// `ghp_abcdef123456` → `ghp_***`
fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "***".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}***")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_VARS: &[&str] = &[
        "LISTEN",
        "LOG_FORMAT",
        "GITHUB_API_BASE_URL",
        "GITHUB_TOKEN",
        "GITHUB_USER_AGENT",
        "GITHUB_TIMEOUT_MS",
        "GITHUB_RETRY_MAX_ATTEMPTS",
        "GITHUB_RETRY_BACKOFF_MS",
        "GITHUB_RETRY_MAX_BACKOFF_MS",
        "CIRCUIT_FAILURE_RATE_THRESHOLD",
        "CIRCUIT_SLIDING_WINDOW_SIZE",
        "CIRCUIT_MINIMUM_CALLS",
        "CIRCUIT_OPEN_COOLDOWN_SECS",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially
        unsafe {
            for var in ALL_VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("ghp_abcdef123456"), "ghp_***");
        assert_eq!(mask_secret("short"), "***");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "8080".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "127.0.0.1:8080".to_string();

        config.github_api_base_url = "not a url".to_string();
        assert!(config.validate().is_err());
        config.github_api_base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
        config.github_api_base_url = "http://localhost:9000".to_string();
        assert!(config.validate().is_ok());

        config.retry_max_attempts = 0;
        assert!(config.validate().is_err());
        config.retry_max_attempts = 11;
        assert!(config.validate().is_err());
        config.retry_max_attempts = 1;
        assert!(config.validate().is_ok());

        config.retry_max_backoff_ms = 50;
        assert!(config.validate().is_err());
        config.retry_max_backoff_ms = 2_000;

        config.circuit_failure_rate_threshold = 0;
        assert!(config.validate().is_err());
        config.circuit_failure_rate_threshold = 101;
        assert!(config.validate().is_err());
        config.circuit_failure_rate_threshold = 100;
        assert!(config.validate().is_ok());

        config.circuit_minimum_calls = 11;
        assert!(config.validate().is_err());
        config.circuit_minimum_calls = 10;
        assert!(config.validate().is_ok());

        config.circuit_open_cooldown_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_derived_component_configs() {
        let config = Config {
            github_token: Some("secret".to_string()),
            github_timeout_ms: 1_500,
            retry_max_attempts: 4,
            retry_backoff_ms: 10,
            retry_max_backoff_ms: 80,
            circuit_open_cooldown_secs: 7,
            ..Config::default()
        };

        let client = config.github_client_config();
        assert_eq!(client.token.as_deref(), Some("secret"));
        assert_eq!(client.timeout, Duration::from_millis(1_500));
        assert_eq!(client.retry.max_attempts, 4);
        assert_eq!(client.retry.backoff, Duration::from_millis(10));
        assert_eq!(client.retry.max_backoff, Duration::from_millis(80));

        let breaker = config.circuit_breaker_config();
        assert_eq!(breaker.failure_rate_threshold, 50);
        assert_eq!(breaker.open_cooldown, Duration::from_secs(7));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.github_api_base_url, "https://api.github.com");
        assert!(config.github_token.is_none());
        assert_eq!(config.retry_max_attempts, 3);
        assert_eq!(config.circuit_sliding_window_size, 10);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("LISTEN", "127.0.0.1:9090");
            env::set_var("GITHUB_API_BASE_URL", "http://localhost:1234");
            env::set_var("GITHUB_TOKEN", "  ghp_token  ");
            env::set_var("GITHUB_RETRY_MAX_ATTEMPTS", "5");
            env::set_var("CIRCUIT_OPEN_COOLDOWN_SECS", "12");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9090");
        assert_eq!(config.github_api_base_url, "http://localhost:1234");
        assert_eq!(config.github_token.as_deref(), Some("ghp_token"));
        assert_eq!(config.retry_max_attempts, 5);
        assert_eq!(config.circuit_open_cooldown_secs, 12);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_token_is_ignored() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("GITHUB_TOKEN", "   ");
        }

        let config = Config::from_env().unwrap();
        assert!(config.github_token.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_number_is_error() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("GITHUB_TIMEOUT_MS", "fast");
        }

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("GITHUB_TIMEOUT_MS"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_from_env_rejects_invalid_values() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("CIRCUIT_FAILURE_RATE_THRESHOLD", "0");
        }

        assert!(load_from_env().is_err());

        clear_env();
    }
}
