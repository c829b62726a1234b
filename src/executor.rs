//! Request execution: transport seam, response classification, retries.
//!
//! The async and blocking facades share everything here except the retry
//! loop's sleep; classification and retry decisions are pure functions, so
//! the two transports cannot drift apart.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;
use crate::error::{DiscussionsError, DiscussionsResult, HttpErrorInfo};
use crate::operation::{GraphqlResponse, Operation};
use crate::ratelimit::RateLimitHeaders;
use crate::retry::{RetryDecision, RetryPolicy};

/// Raw HTTP response handed to classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, keys lower-cased.
    pub headers: HashMap<String, String>,
    /// Response body bytes.
    pub body: Vec<u8>,
}

/// Non-blocking transport capability: one HTTPS POST of a request body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the serialized request body and return the raw response.
    async fn send(&self, body: Vec<u8>) -> DiscussionsResult<RawResponse>;
}

/// Blocking transport capability, mirror of [`Transport`].
pub trait BlockingTransport {
    /// Send the serialized request body and return the raw response.
    fn send(&self, body: &[u8]) -> DiscussionsResult<RawResponse>;
}

/// Async transport over a shared `reqwest` connection pool.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub(crate) fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: Vec<u8>) -> DiscussionsResult<RawResponse> {
        let response = self.client.post(&self.endpoint).body(body).send().await?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Blocking transport over a shared `reqwest` connection pool.
#[derive(Debug, Clone)]
pub(crate) struct BlockingHttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl BlockingHttpTransport {
    pub(crate) fn new(client: reqwest::blocking::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

impl BlockingTransport for BlockingHttpTransport {
    fn send(&self, body: &[u8]) -> DiscussionsResult<RawResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .body(body.to_vec())
            .send()?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.bytes()?.to_vec();
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_ascii_lowercase(), value.to_string()))
        })
        .collect()
}

fn truncate_body(bytes: &[u8]) -> String {
    const MAX_LEN: usize = 4096;
    let mut body = String::from_utf8_lossy(bytes).to_string();
    if body.len() > MAX_LEN {
        body.truncate(MAX_LEN);
        body.push('…');
    }
    body
}

fn rate_limited(limits: &RateLimitHeaders) -> DiscussionsError {
    DiscussionsError::RateLimited {
        limit: limits.limit,
        remaining: limits.remaining,
        reset_at: limits.reset_datetime(),
        retry_after: limits.suggested_wait(),
    }
}

/// Classify one raw response into a decoded `data` payload or an error.
///
/// Priority: HTTP status (auth, missing, rate limited, server error), then
/// the GraphQL error list (missing, rate limited, generic), then the data
/// payload itself.
pub(crate) fn classify_response(
    raw: &RawResponse,
    signals: &RateLimitConfig,
) -> DiscussionsResult<serde_json::Value> {
    let limits = RateLimitHeaders::parse(&raw.headers);

    match raw.status {
        401 => {
            return Err(DiscussionsError::Authentication {
                message: truncate_body(&raw.body),
            });
        }
        403 => {
            // GitHub reports primary and secondary rate limits as 403 as
            // well as 429; exhausted headers disambiguate.
            if limits.is_exhausted() {
                return Err(rate_limited(&limits));
            }
            return Err(DiscussionsError::Authentication {
                message: truncate_body(&raw.body),
            });
        }
        404 => {
            return Err(DiscussionsError::NotFound {
                message: truncate_body(&raw.body),
            });
        }
        429 => return Err(rate_limited(&limits)),
        status if !(200..300).contains(&status) => {
            return Err(DiscussionsError::Network(HttpErrorInfo {
                message: format!("HTTP status {status}: {}", truncate_body(&raw.body)),
                status_code: Some(status),
                is_timeout: false,
                is_connect: false,
                is_request: false,
            }));
        }
        _ => {}
    }

    let response: GraphqlResponse = serde_json::from_slice(&raw.body)?;
    if !response.errors.is_empty() {
        if let Some(missing) = response
            .errors
            .iter()
            .find(|err| err.error_type.as_deref() == Some("NOT_FOUND"))
        {
            return Err(DiscussionsError::NotFound {
                message: missing.message.clone(),
            });
        }
        if response
            .errors
            .iter()
            .any(|err| signals.matches(err.error_type.as_deref()))
        {
            return Err(rate_limited(&limits));
        }
        return Err(DiscussionsError::Graphql {
            errors: response.errors,
        });
    }

    response
        .data
        .ok_or_else(|| DiscussionsError::Decode("response carried no data".to_string()))
}

/// Execute one operation with bounded retries over an async transport.
pub(crate) async fn execute<T: Transport>(
    transport: &T,
    op: &Operation,
    policy: &RetryPolicy,
    signals: &RateLimitConfig,
) -> DiscussionsResult<serde_json::Value> {
    let body = serde_json::to_vec(&op.body())?;
    let idempotent = op.kind.is_idempotent();
    let mut attempt = 1;
    loop {
        debug!(operation = op.name(), attempt, "sending GraphQL request");
        let result = transport
            .send(body.clone())
            .await
            .and_then(|raw| classify_response(&raw, signals));
        match result {
            Ok(data) => return Ok(data),
            Err(err) => match policy.decide(&err, attempt, idempotent) {
                RetryDecision::RetryAfter(delay) => {
                    warn!(
                        operation = op.name(),
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "retrying GraphQL request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                RetryDecision::DoNotRetry => return Err(err),
            },
        }
    }
}

/// Execute one operation with bounded retries over a blocking transport.
pub(crate) fn execute_blocking<T: BlockingTransport>(
    transport: &T,
    op: &Operation,
    policy: &RetryPolicy,
    signals: &RateLimitConfig,
) -> DiscussionsResult<serde_json::Value> {
    let body = serde_json::to_vec(&op.body())?;
    let idempotent = op.kind.is_idempotent();
    let mut attempt = 1;
    loop {
        debug!(operation = op.name(), attempt, "sending GraphQL request");
        let result = transport
            .send(&body)
            .and_then(|raw| classify_response(&raw, signals));
        match result {
            Ok(data) => return Ok(data),
            Err(err) => match policy.decide(&err, attempt, idempotent) {
                RetryDecision::RetryAfter(delay) => {
                    warn!(
                        operation = op.name(),
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "retrying GraphQL request"
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                RetryDecision::DoNotRetry => return Err(err),
            },
        }
    }
}
