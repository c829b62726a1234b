//! Asynchronous Discussions client facade.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;

use crate::config::{GithubConfig, RateLimitConfig, RetryConfig};
use crate::error::{DiscussionsError, DiscussionsResult};
use crate::executor::{self, HttpTransport};
use crate::operation::Operation;
use crate::pagination::{paginate_cursor, PageLimit};
use crate::queries::{self, decode};
use crate::retry::RetryPolicy;
use crate::types::{Category, Comment, Discussion, PaginatedResult, RateLimitStatus};

pub(crate) fn default_user_agent() -> String {
    format!("github-discussions/{}", env!("CARGO_PKG_VERSION"))
}

pub(crate) fn build_headers(token: &str, user_agent: &str) -> DiscussionsResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
        DiscussionsError::Validation("token contains invalid header characters".to_string())
    })?;
    headers.insert(AUTHORIZATION, bearer);
    let agent = HeaderValue::from_str(user_agent).map_err(|_| {
        DiscussionsError::Validation("user agent contains invalid header characters".to_string())
    })?;
    headers.insert(USER_AGENT, agent);
    Ok(headers)
}

/// Builder for [`DiscussionsClient`].
#[derive(Debug, Clone)]
pub struct DiscussionsClientBuilder {
    config: GithubConfig,
    user_agent: String,
}

impl DiscussionsClientBuilder {
    /// Create a new builder with the given token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            config: GithubConfig::new(token),
            user_agent: default_user_agent(),
        }
    }

    /// Start from a full configuration.
    #[must_use]
    pub fn from_config(config: GithubConfig) -> Self {
        Self {
            config,
            user_agent: default_user_agent(),
        }
    }

    /// Override the GraphQL endpoint (GitHub Enterprise Server).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set the rate limit detection configuration.
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.config.rate_limit = rate_limit;
        self
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> DiscussionsResult<DiscussionsClient> {
        let headers = build_headers(&self.config.token, &self.user_agent)?;
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.config.timeout)
            .build()?;
        Ok(DiscussionsClient {
            transport: HttpTransport::new(http, self.config.endpoint.clone()),
            retry: self.config.retry.to_policy(),
            signals: self.config.rate_limit,
        })
    }
}

/// Asynchronous GitHub Discussions client.
///
/// Owns one `reqwest` connection pool for its lifetime; the pool is closed
/// when the last clone is dropped, on every exit path. Clones share the
/// pool and are safe for concurrent use — the client imposes no implicit
/// concurrency limit, so bounding in-flight requests to respect rate
/// limits is the caller's responsibility. Dropping an in-flight future
/// aborts the request without retrying.
#[derive(Debug, Clone)]
pub struct DiscussionsClient {
    transport: HttpTransport,
    retry: RetryPolicy,
    signals: RateLimitConfig,
}

impl DiscussionsClient {
    /// Create a client with default configuration.
    pub fn new(token: impl Into<String>) -> DiscussionsResult<Self> {
        DiscussionsClientBuilder::new(token).build()
    }

    /// Create a client with the token read from `GITHUB_TOKEN`.
    pub fn from_env() -> DiscussionsResult<Self> {
        Self::from_config(GithubConfig::from_env()?)
    }

    /// Create a client from a full configuration.
    pub fn from_config(config: GithubConfig) -> DiscussionsResult<Self> {
        DiscussionsClientBuilder::from_config(config).build()
    }

    /// Start building a client.
    #[must_use]
    pub fn builder(token: impl Into<String>) -> DiscussionsClientBuilder {
        DiscussionsClientBuilder::new(token)
    }

    async fn run(&self, op: Operation) -> DiscussionsResult<Value> {
        executor::execute(&self.transport, &op, &self.retry, &self.signals).await
    }

    /// Resolve a repository's node ID from its owner and name.
    pub async fn get_repository_id(&self, owner: &str, repo: &str) -> DiscussionsResult<String> {
        decode::repository_id(self.run(queries::repository_id(owner, repo)?).await?)
    }

    /// Fetch one page of a repository's discussions.
    pub async fn get_discussions(
        &self,
        owner: &str,
        repo: &str,
        first: u32,
        after: Option<&str>,
    ) -> DiscussionsResult<PaginatedResult<Discussion>> {
        decode::discussions(
            self.run(queries::get_discussions(owner, repo, first, after)?)
                .await?,
        )
    }

    /// Fetch every discussion in a repository, walking all pages.
    pub async fn get_all_discussions(
        &self,
        owner: &str,
        repo: &str,
        page_size: u32,
        limit: Option<PageLimit>,
    ) -> DiscussionsResult<Vec<Discussion>> {
        paginate_cursor(None, limit, |cursor| async move {
            self.get_discussions(owner, repo, page_size, cursor.as_deref())
                .await
        })
        .await
    }

    /// Fetch a single discussion by number.
    pub async fn get_discussion(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> DiscussionsResult<Discussion> {
        decode::discussion(self.run(queries::get_discussion(owner, repo, number)?).await?)
    }

    /// Fetch one page of a discussion's comments.
    pub async fn get_discussion_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        first: u32,
        after: Option<&str>,
    ) -> DiscussionsResult<PaginatedResult<Comment>> {
        decode::discussion_comments(
            self.run(queries::get_discussion_comments(
                owner, repo, number, first, after,
            )?)
            .await?,
        )
    }

    /// Fetch one page of a repository's discussion categories.
    pub async fn get_discussion_categories(
        &self,
        owner: &str,
        repo: &str,
        first: u32,
        after: Option<&str>,
    ) -> DiscussionsResult<PaginatedResult<Category>> {
        decode::categories(
            self.run(queries::get_discussion_categories(owner, repo, first, after)?)
                .await?,
        )
    }

    /// Fetch one page of a repository's pinned discussions.
    pub async fn get_pinned_discussions(
        &self,
        owner: &str,
        repo: &str,
        first: u32,
        after: Option<&str>,
    ) -> DiscussionsResult<PaginatedResult<Discussion>> {
        decode::pinned_discussions(
            self.run(queries::get_pinned_discussions(owner, repo, first, after)?)
                .await?,
        )
    }

    /// Fetch the current rate limit snapshot.
    pub async fn get_rate_limit_status(&self) -> DiscussionsResult<RateLimitStatus> {
        decode::rate_limit(self.run(queries::get_rate_limit_status()?).await?)
    }

    /// Create a discussion and return its snapshot.
    pub async fn create_discussion(
        &self,
        repository_id: &str,
        category_id: &str,
        title: &str,
        body: &str,
    ) -> DiscussionsResult<Discussion> {
        decode::mutation_discussion(
            self.run(queries::create_discussion(
                repository_id,
                category_id,
                title,
                body,
            )?)
            .await?,
            "createDiscussion",
        )
    }

    /// Update a discussion's title and/or body.
    pub async fn update_discussion(
        &self,
        discussion_id: &str,
        title: Option<&str>,
        body: Option<&str>,
    ) -> DiscussionsResult<Discussion> {
        decode::mutation_discussion(
            self.run(queries::update_discussion(discussion_id, title, body)?)
                .await?,
            "updateDiscussion",
        )
    }

    /// Delete a discussion and return its last snapshot.
    pub async fn delete_discussion(&self, discussion_id: &str) -> DiscussionsResult<Discussion> {
        decode::mutation_discussion(
            self.run(queries::delete_discussion(discussion_id)?).await?,
            "deleteDiscussion",
        )
    }

    /// Add a comment to a discussion, optionally as a reply.
    pub async fn add_discussion_comment(
        &self,
        discussion_id: &str,
        body: &str,
        reply_to_id: Option<&str>,
    ) -> DiscussionsResult<Comment> {
        decode::mutation_comment(
            self.run(queries::add_discussion_comment(
                discussion_id,
                body,
                reply_to_id,
            )?)
            .await?,
            "addDiscussionComment",
        )
    }

    /// Update a comment's body.
    pub async fn update_discussion_comment(
        &self,
        comment_id: &str,
        body: &str,
    ) -> DiscussionsResult<Comment> {
        decode::mutation_comment(
            self.run(queries::update_discussion_comment(comment_id, body)?)
                .await?,
            "updateDiscussionComment",
        )
    }

    /// Delete a comment and return its last snapshot.
    pub async fn delete_discussion_comment(
        &self,
        comment_id: &str,
    ) -> DiscussionsResult<Comment> {
        decode::mutation_comment(
            self.run(queries::delete_discussion_comment(comment_id)?)
                .await?,
            "deleteDiscussionComment",
        )
    }

    /// Mark a comment as its discussion's answer.
    pub async fn mark_comment_as_answer(
        &self,
        comment_id: &str,
    ) -> DiscussionsResult<Discussion> {
        decode::mutation_discussion(
            self.run(queries::mark_comment_as_answer(comment_id)?).await?,
            "markDiscussionCommentAsAnswer",
        )
    }

    /// Unmark a comment as its discussion's answer.
    pub async fn unmark_comment_as_answer(
        &self,
        comment_id: &str,
    ) -> DiscussionsResult<Discussion> {
        decode::mutation_discussion(
            self.run(queries::unmark_comment_as_answer(comment_id)?)
                .await?,
            "unmarkDiscussionCommentAsAnswer",
        )
    }

    /// Pin a discussion to its repository.
    pub async fn pin_discussion(&self, discussion_id: &str) -> DiscussionsResult<Discussion> {
        decode::pin_payload(
            self.run(queries::pin_discussion(discussion_id)?).await?,
            "pinDiscussion",
            true,
        )
    }

    /// Unpin a discussion from its repository.
    pub async fn unpin_discussion(&self, discussion_id: &str) -> DiscussionsResult<Discussion> {
        decode::pin_payload(
            self.run(queries::unpin_discussion(discussion_id)?).await?,
            "unpinDiscussion",
            false,
        )
    }

    /// Execute an arbitrary GraphQL document and return the raw `data`
    /// payload.
    ///
    /// The one intentionally unchecked boundary: the document and
    /// variables pass through verbatim, error classification and retry
    /// behave as for any other call, and a document whose leading keyword
    /// is `mutation` is never auto-retried.
    pub async fn execute_query(
        &self,
        query: &str,
        variables: Value,
    ) -> DiscussionsResult<Value> {
        self.run(queries::raw(query, variables)).await
    }
}
