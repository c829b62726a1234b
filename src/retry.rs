//! Retry policy helpers.

use std::time::Duration;

use rand::Rng;

use crate::error::DiscussionsError;

/// Retry decision result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after a delay.
    RetryAfter(Duration),
    /// Do not retry.
    DoNotRetry,
}

/// Retry strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStrategy {
    /// Never retry.
    Never,
    /// Retry only for idempotent operations.
    IdempotentOnly,
    /// Retry regardless of idempotency.
    Always,
}

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    pub max_attempts: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Maximum jitter to add to delays.
    pub max_jitter: Duration,
    /// Retry strategy.
    pub strategy: RetryStrategy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            max_jitter: Duration::from_millis(150),
            strategy: RetryStrategy::IdempotentOnly,
        }
    }
}

impl RetryPolicy {
    /// Decide whether to retry based on the error and attempt count.
    ///
    /// A server-suggested wait (rate limit reset or `retry-after`) takes
    /// precedence over a smaller computed backoff.
    #[must_use]
    pub fn decide(
        &self,
        error: &DiscussionsError,
        attempt: u32,
        idempotent: bool,
    ) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::DoNotRetry;
        }
        if !error.is_retryable() {
            return RetryDecision::DoNotRetry;
        }

        match self.strategy {
            RetryStrategy::Never => RetryDecision::DoNotRetry,
            RetryStrategy::IdempotentOnly if !idempotent => RetryDecision::DoNotRetry,
            _ => {
                let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
                let exp = 2_u64.saturating_pow(attempt.saturating_sub(1));
                let mut delay = Duration::from_millis(base_ms.saturating_mul(exp));
                if delay > self.max_delay {
                    delay = self.max_delay;
                }
                if let Some(server_wait) = error.retry_after() {
                    if server_wait > delay {
                        delay = server_wait;
                    }
                }
                let jitter_ms = if self.max_jitter.as_millis() > 0 {
                    let jitter_max = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
                    rand::thread_rng().gen_range(0..=jitter_max)
                } else {
                    0
                };
                RetryDecision::RetryAfter(delay + Duration::from_millis(jitter_ms))
            }
        }
    }
}
