//! Typed GraphQL client for GitHub Discussions.
//!
//! This crate provides:
//! - A full typed method surface over the Discussions API (list, create,
//!   update, delete, comment, answer, pin) plus a raw escape hatch.
//! - Response classification into a small closed error taxonomy, with
//!   bounded retry and backoff for transient failures of idempotent
//!   operations.
//! - Cursor pagination helpers.
//! - An asynchronous and a blocking facade sharing one core.
//!
//! ```no_run
//! use github_discussions::DiscussionsClient;
//!
//! # async fn run() -> github_discussions::DiscussionsResult<()> {
//! let client = DiscussionsClient::from_env()?;
//! let page = client.get_discussions("octocat", "hello-world", 50, None).await?;
//! for discussion in &page.nodes {
//!     println!("#{} {}", discussion.number, discussion.title);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod blocking;
mod client;
mod config;
mod error;
mod executor;
mod operation;
mod pagination;
mod queries;
mod ratelimit;
mod retry;
mod types;

pub use client::{DiscussionsClient, DiscussionsClientBuilder};
pub use config::{
    GithubConfig, RateLimitConfig, RetryConfig, DEFAULT_ENDPOINT, TOKEN_ENV_VAR,
};
pub use error::{DiscussionsError, DiscussionsResult, HttpErrorInfo};
pub use executor::{BlockingTransport, RawResponse, Transport};
pub use operation::{
    GraphqlError, GraphqlErrorLocation, GraphqlPathSegment, GraphqlResponse, Operation,
    OperationKind,
};
pub use pagination::{paginate_cursor, PageLimit, Pages};
pub use ratelimit::RateLimitHeaders;
pub use retry::{RetryDecision, RetryPolicy, RetryStrategy};
pub use types::{
    Author, Category, Comment, CommentCount, Discussion, NodeRef, PageInfo, PaginatedResult,
    RateLimitStatus,
};
