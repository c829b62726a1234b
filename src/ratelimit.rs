//! GitHub rate limit header parsing.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

/// Parsed rate limit information from HTTP response headers.
///
/// GitHub reports its primary quota through `x-ratelimit-*` headers and
/// secondary limits through `retry-after`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitHeaders {
    /// Maximum requests allowed in the window.
    pub limit: Option<u32>,
    /// Remaining requests in the current window.
    pub remaining: Option<u32>,
    /// Requests consumed in the current window.
    pub used: Option<u32>,
    /// Unix timestamp of the window reset.
    pub reset_at: Option<u64>,
    /// Retry-After duration when supplied.
    pub retry_after: Option<Duration>,
}

impl RateLimitHeaders {
    /// Parse from a lower-cased header map.
    #[must_use]
    pub fn parse(headers: &HashMap<String, String>) -> Self {
        let mut result = Self {
            limit: parse_header_u32(headers, "x-ratelimit-limit"),
            remaining: parse_header_u32(headers, "x-ratelimit-remaining"),
            used: parse_header_u32(headers, "x-ratelimit-used"),
            reset_at: parse_header_u64(headers, "x-ratelimit-reset"),
            retry_after: None,
        };
        if let Some(retry) = headers.get("retry-after") {
            if let Ok(secs) = retry.trim().parse::<u64>() {
                result.retry_after = Some(Duration::from_secs(secs));
            }
        }
        result
    }

    /// Check whether the headers signal quota exhaustion.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.remaining, Some(0)) || self.retry_after.is_some()
    }

    /// Reset time as a timezone-aware timestamp.
    #[must_use]
    pub fn reset_datetime(&self) -> Option<DateTime<Utc>> {
        let reset = i64::try_from(self.reset_at?).ok()?;
        Utc.timestamp_opt(reset, 0).single()
    }

    /// Suggested wait before retrying: `retry-after` when present, the
    /// time until reset otherwise.
    #[must_use]
    pub fn suggested_wait(&self) -> Option<Duration> {
        if let Some(retry) = self.retry_after {
            return Some(retry);
        }
        let reset = self.reset_datetime()?;
        (reset - Utc::now()).to_std().ok()
    }
}

fn parse_header_u32(headers: &HashMap<String, String>, key: &str) -> Option<u32> {
    headers.get(key).and_then(|value| value.trim().parse().ok())
}

fn parse_header_u64(headers: &HashMap<String, String>, key: &str) -> Option<u64> {
    headers.get(key).and_then(|value| value.trim().parse().ok())
}
