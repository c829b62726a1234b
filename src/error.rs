//! Error types for the Discussions client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::operation::GraphqlError;

/// HTTP error information captured from reqwest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpErrorInfo {
    /// Error message.
    pub message: String,
    /// HTTP status code (if available).
    pub status_code: Option<u16>,
    /// Whether the error was a timeout.
    pub is_timeout: bool,
    /// Whether the error was a connection failure.
    pub is_connect: bool,
    /// Whether the error was a request error.
    pub is_request: bool,
}

impl From<reqwest::Error> for HttpErrorInfo {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status_code: err.status().map(|status| status.as_u16()),
            is_timeout: err.is_timeout(),
            is_connect: err.is_connect(),
            is_request: err.is_request(),
        }
    }
}

/// Error type for Discussions client operations.
///
/// One variant per distinguishable failure category; `Network` and
/// `RateLimited` are the only transient kinds.
#[derive(Debug, Clone, Error)]
pub enum DiscussionsError {
    /// Transport-level failure (connect, timeout, DNS) or a server error
    /// with no usable GraphQL payload.
    #[error("network error: {}", .0.message)]
    Network(HttpErrorInfo),

    /// HTTP 401, or 403 without a rate-limit signal. Caller must fix
    /// credentials.
    #[error("authentication failed: {message}")]
    Authentication {
        /// Response detail.
        message: String,
    },

    /// HTTP 404 or a GraphQL `NOT_FOUND` error. Caller must fix identifiers.
    #[error("not found: {message}")]
    NotFound {
        /// Response detail.
        message: String,
    },

    /// Server-signaled quota exhaustion, retryable after reset.
    #[error("rate limit exhausted")]
    RateLimited {
        /// Request quota for the current window.
        limit: Option<u32>,
        /// Requests remaining in the current window.
        remaining: Option<u32>,
        /// When the quota resets.
        reset_at: Option<DateTime<Utc>>,
        /// Server-suggested wait before retrying.
        retry_after: Option<Duration>,
    },

    /// GraphQL-level errors returned by the server (schema or validation
    /// failures). Never retried.
    #[error("GraphQL errors: {errors:?}")]
    Graphql {
        /// Raw GraphQL error list.
        errors: Vec<GraphqlError>,
    },

    /// Response did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Structurally invalid input rejected before any network call.
    #[error("invalid request: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for DiscussionsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(HttpErrorInfo::from(err))
    }
}

impl From<serde_json::Error> for DiscussionsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl DiscussionsError {
    /// Returns `true` if the error is retryable for idempotent operations.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RateLimited { .. })
    }

    /// Get the server-suggested retry delay, when one was signaled.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited {
                retry_after,
                reset_at,
                ..
            } => (*retry_after).or_else(|| {
                let reset = (*reset_at)?;
                (reset - Utc::now()).to_std().ok()
            }),
            _ => None,
        }
    }
}

/// Result type for Discussions operations.
pub type DiscussionsResult<T> = Result<T, DiscussionsError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> DiscussionsError {
        DiscussionsError::Network(HttpErrorInfo {
            message: "connection refused".to_string(),
            status_code: None,
            is_timeout: false,
            is_connect: true,
            is_request: false,
        })
    }

    #[test]
    fn retryable_kinds() {
        assert!(network().is_retryable());
        assert!(
            DiscussionsError::RateLimited {
                limit: Some(5000),
                remaining: Some(0),
                reset_at: None,
                retry_after: Some(Duration::from_secs(1)),
            }
            .is_retryable()
        );

        assert!(
            !DiscussionsError::Authentication {
                message: "bad credentials".to_string()
            }
            .is_retryable()
        );
        assert!(
            !DiscussionsError::NotFound {
                message: "no such discussion".to_string()
            }
            .is_retryable()
        );
        assert!(!DiscussionsError::Graphql { errors: vec![] }.is_retryable());
        assert!(!DiscussionsError::Validation("bad input".to_string()).is_retryable());
    }

    #[test]
    fn retry_after_prefers_explicit_duration() {
        let err = DiscussionsError::RateLimited {
            limit: None,
            remaining: None,
            reset_at: Some(Utc::now() + chrono::Duration::seconds(120)),
            retry_after: Some(Duration::from_secs(30)),
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn retry_after_falls_back_to_reset() {
        let err = DiscussionsError::RateLimited {
            limit: None,
            remaining: None,
            reset_at: Some(Utc::now() + chrono::Duration::seconds(60)),
            retry_after: None,
        };
        let wait = err.retry_after().expect("wait derived from reset");
        assert!(wait <= Duration::from_secs(60));
        assert!(wait >= Duration::from_secs(55));
    }

    #[test]
    fn retry_after_absent_for_other_kinds() {
        assert_eq!(network().retry_after(), None);
    }
}
