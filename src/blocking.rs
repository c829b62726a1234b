//! Blocking Discussions client facade.
//!
//! Same method surface and error taxonomy as the async client; query
//! building, classification, retry decisions, and decoding are the shared
//! core, so the two facades cannot drift apart.

use std::time::Duration;

use serde_json::Value;

use crate::client::{build_headers, default_user_agent};
use crate::config::{GithubConfig, RateLimitConfig, RetryConfig};
use crate::error::DiscussionsResult;
use crate::executor::{self, BlockingHttpTransport};
use crate::operation::Operation;
use crate::pagination::Pages;
use crate::queries::{self, decode};
use crate::retry::RetryPolicy;
use crate::types::{Category, Comment, Discussion, PaginatedResult, RateLimitStatus};

/// Builder for the blocking [`DiscussionsClient`].
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
        let http = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(self.config.timeout)
            .build()?;
        Ok(DiscussionsClient {
            transport: BlockingHttpTransport::new(http, self.config.endpoint.clone()),
            retry: self.config.retry.to_policy(),
            signals: self.config.rate_limit,
        })
    }
}

/// Blocking GitHub Discussions client.
///
/// Performs one blocking call per operation on the calling thread; no
/// internal threading. Owns one `reqwest` connection pool, closed when
/// the last clone is dropped, on every exit path.
#[derive(Debug, Clone)]
pub struct DiscussionsClient {
    transport: BlockingHttpTransport,
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

    fn run(&self, op: Operation) -> DiscussionsResult<Value> {
        executor::execute_blocking(&self.transport, &op, &self.retry, &self.signals)
    }

    /// Resolve a repository's node ID from its owner and name.
    pub fn get_repository_id(&self, owner: &str, repo: &str) -> DiscussionsResult<String> {
        decode::repository_id(self.run(queries::repository_id(owner, repo)?)?)
    }

    /// Fetch one page of a repository's discussions.
    pub fn get_discussions(
        &self,
        owner: &str,
        repo: &str,
        first: u32,
        after: Option<&str>,
    ) -> DiscussionsResult<PaginatedResult<Discussion>> {
        decode::discussions(self.run(queries::get_discussions(owner, repo, first, after)?)?)
    }

    /// Iterate over every page of a repository's discussions lazily.
    pub fn iter_discussions<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        page_size: u32,
    ) -> Pages<Discussion, impl FnMut(Option<String>) -> DiscussionsResult<PaginatedResult<Discussion>> + 'a>
    {
        Pages::new(None, move |cursor| {
            self.get_discussions(owner, repo, page_size, cursor.as_deref())
        })
    }

    /// Fetch a single discussion by number.
    pub fn get_discussion(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> DiscussionsResult<Discussion> {
        decode::discussion(self.run(queries::get_discussion(owner, repo, number)?)?)
    }

    /// Fetch one page of a discussion's comments.
    pub fn get_discussion_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        first: u32,
        after: Option<&str>,
    ) -> DiscussionsResult<PaginatedResult<Comment>> {
        decode::discussion_comments(self.run(queries::get_discussion_comments(
            owner, repo, number, first, after,
        )?)?)
    }

    /// Iterate over every page of a discussion's comments lazily.
    pub fn iter_discussion_comments<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        number: u64,
        page_size: u32,
    ) -> Pages<Comment, impl FnMut(Option<String>) -> DiscussionsResult<PaginatedResult<Comment>> + 'a>
    {
        Pages::new(None, move |cursor| {
            self.get_discussion_comments(owner, repo, number, page_size, cursor.as_deref())
        })
    }

    /// Fetch one page of a repository's discussion categories.
    pub fn get_discussion_categories(
        &self,
        owner: &str,
        repo: &str,
        first: u32,
        after: Option<&str>,
    ) -> DiscussionsResult<PaginatedResult<Category>> {
        decode::categories(self.run(queries::get_discussion_categories(
            owner, repo, first, after,
        )?)?)
    }

    /// Fetch one page of a repository's pinned discussions.
    pub fn get_pinned_discussions(
        &self,
        owner: &str,
        repo: &str,
        first: u32,
        after: Option<&str>,
    ) -> DiscussionsResult<PaginatedResult<Discussion>> {
        decode::pinned_discussions(self.run(queries::get_pinned_discussions(
            owner, repo, first, after,
        )?)?)
    }

    /// Fetch the current rate limit snapshot.
    pub fn get_rate_limit_status(&self) -> DiscussionsResult<RateLimitStatus> {
        decode::rate_limit(self.run(queries::get_rate_limit_status()?)?)
    }

    /// Create a discussion and return its snapshot.
    pub fn create_discussion(
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
            )?)?,
            "createDiscussion",
        )
    }

    /// Update a discussion's title and/or body.
    pub fn update_discussion(
        &self,
        discussion_id: &str,
        title: Option<&str>,
        body: Option<&str>,
    ) -> DiscussionsResult<Discussion> {
        decode::mutation_discussion(
            self.run(queries::update_discussion(discussion_id, title, body)?)?,
            "updateDiscussion",
        )
    }

    /// Delete a discussion and return its last snapshot.
    pub fn delete_discussion(&self, discussion_id: &str) -> DiscussionsResult<Discussion> {
        decode::mutation_discussion(
            self.run(queries::delete_discussion(discussion_id)?)?,
            "deleteDiscussion",
        )
    }

    /// Add a comment to a discussion, optionally as a reply.
    pub fn add_discussion_comment(
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
            )?)?,
            "addDiscussionComment",
        )
    }

    /// Update a comment's body.
    pub fn update_discussion_comment(
        &self,
        comment_id: &str,
        body: &str,
    ) -> DiscussionsResult<Comment> {
        decode::mutation_comment(
            self.run(queries::update_discussion_comment(comment_id, body)?)?,
            "updateDiscussionComment",
        )
    }

    /// Delete a comment and return its last snapshot.
    pub fn delete_discussion_comment(&self, comment_id: &str) -> DiscussionsResult<Comment> {
        decode::mutation_comment(
            self.run(queries::delete_discussion_comment(comment_id)?)?,
            "deleteDiscussionComment",
        )
    }

    /// Mark a comment as its discussion's answer.
    pub fn mark_comment_as_answer(&self, comment_id: &str) -> DiscussionsResult<Discussion> {
        decode::mutation_discussion(
            self.run(queries::mark_comment_as_answer(comment_id)?)?,
            "markDiscussionCommentAsAnswer",
        )
    }

    /// Unmark a comment as its discussion's answer.
    pub fn unmark_comment_as_answer(&self, comment_id: &str) -> DiscussionsResult<Discussion> {
        decode::mutation_discussion(
            self.run(queries::unmark_comment_as_answer(comment_id)?)?,
            "unmarkDiscussionCommentAsAnswer",
        )
    }

    /// Pin a discussion to its repository.
    pub fn pin_discussion(&self, discussion_id: &str) -> DiscussionsResult<Discussion> {
        decode::pin_payload(
            self.run(queries::pin_discussion(discussion_id)?)?,
            "pinDiscussion",
            true,
        )
    }

    /// Unpin a discussion from its repository.
    pub fn unpin_discussion(&self, discussion_id: &str) -> DiscussionsResult<Discussion> {
        decode::pin_payload(
            self.run(queries::unpin_discussion(discussion_id)?)?,
            "unpinDiscussion",
            false,
        )
    }

    /// Execute an arbitrary GraphQL document and return the raw `data`
    /// payload.
    ///
    /// Same contract as the async facade: verbatim pass-through, shared
    /// classification and retry, and no auto-retry for documents whose
    /// leading keyword is `mutation`.
    pub fn execute_query(&self, query: &str, variables: Value) -> DiscussionsResult<Value> {
        self.run(queries::raw(query, variables))
    }
}
