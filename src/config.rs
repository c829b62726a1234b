//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DiscussionsError, DiscussionsResult};
use crate::retry::{RetryPolicy, RetryStrategy};

/// Default GraphQL endpoint. Override for GitHub Enterprise Server.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

/// Environment variable consulted when no token is passed explicitly.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Configuration for the Discussions client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Personal access token or installation token.
    pub token: String,

    /// GraphQL endpoint (default: the public GitHub API).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,

    /// Rate limit detection configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl GithubConfig {
    /// Create a configuration with defaults for everything but the token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: default_endpoint(),
            timeout: default_timeout(),
            retry: RetryConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Create a configuration with the token read from `GITHUB_TOKEN`.
    pub fn from_env() -> DiscussionsResult<Self> {
        let token = std::env::var(TOKEN_ENV_VAR).map_err(|_| {
            DiscussionsError::Validation(format!(
                "no token provided and `{TOKEN_ENV_VAR}` is not set"
            ))
        })?;
        Ok(Self::new(token))
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts, including the initial one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay between retries in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay between retries in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Maximum jitter added to each delay in milliseconds
    #[serde(default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    60_000
}

fn default_max_jitter_ms() -> u64 {
    150
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            max_jitter_ms: default_max_jitter_ms(),
        }
    }
}

impl RetryConfig {
    /// Build the runtime retry policy. Mutations are never auto-retried.
    #[must_use]
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            max_jitter: Duration::from_millis(self.max_jitter_ms),
            strategy: RetryStrategy::IdempotentOnly,
        }
    }
}

/// Rate limit detection configuration.
///
/// GitHub signals quota exhaustion through headers (authoritative) and
/// through GraphQL error types; the latter set is configurable rather than
/// hard-coded because the server's error strings are not a stable contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// GraphQL error `type` values classified as rate limiting.
    #[serde(default = "default_error_types")]
    pub graphql_error_types: Vec<String>,
}

fn default_error_types() -> Vec<String> {
    vec!["RATE_LIMITED".to_string()]
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            graphql_error_types: default_error_types(),
        }
    }
}

impl RateLimitConfig {
    /// Check whether a GraphQL error type matches the trigger set.
    #[must_use]
    pub fn matches(&self, error_type: Option<&str>) -> bool {
        error_type.is_some_and(|value| {
            self.graphql_error_types
                .iter()
                .any(|candidate| candidate == value)
        })
    }
}
