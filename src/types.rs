//! GitHub Discussions data records.
//!
//! Every record is an immutable snapshot of server state at fetch time;
//! mutations return fresh snapshots. IDs and cursors are opaque
//! server-issued strings and are never constructed locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DiscussionsError, DiscussionsResult};

/// Discussion or comment author, projected to its login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Account login.
    pub login: String,
}

/// Reference to another node by ID, non-owning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    /// Opaque node ID.
    pub id: String,
}

/// Comment count connection projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCount {
    /// Total number of comments.
    pub total_count: u64,
}

/// A discussion category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Opaque node ID.
    pub id: String,
    /// Category name.
    pub name: String,
    /// Category description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category emoji.
    pub emoji: String,
    /// Whether discussions in this category can mark an answer.
    pub is_answerable: bool,
}

/// A discussion snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    /// Opaque node ID.
    pub id: String,
    /// Repository-scoped discussion number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Author, absent for deleted accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Comment count.
    #[serde(default)]
    pub comments: CommentCount,
    /// Category, when selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Whether the discussion is pinned to its repository.
    #[serde(default)]
    pub is_pinned: bool,
    /// Whether an answer has been chosen.
    #[serde(default)]
    pub is_answered: bool,
}

impl Discussion {
    /// Total number of comments on the discussion.
    #[must_use]
    pub const fn comment_count(&self) -> u64 {
        self.comments.total_count
    }
}

/// A discussion comment snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Opaque node ID.
    pub id: String,
    /// Body text.
    pub body: String,
    /// Author, absent for deleted accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Parent discussion reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discussion: Option<NodeRef>,
    /// Comment this one replies to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<NodeRef>,
    /// Whether this comment is the chosen answer.
    #[serde(default)]
    pub is_answer: bool,
}

impl Comment {
    /// ID of the parent discussion, when selected.
    #[must_use]
    pub fn discussion_id(&self) -> Option<&str> {
        self.discussion.as_ref().map(|node| node.id.as_str())
    }

    /// ID of the comment this one replies to, if any.
    #[must_use]
    pub fn reply_to_id(&self) -> Option<&str> {
        self.reply_to.as_ref().map(|node| node.id.as_str())
    }
}

/// Cursor pagination state for one page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether there is another page after this one.
    pub has_next_page: bool,
    /// Whether there is a page before this one.
    #[serde(default)]
    pub has_previous_page: bool,
    /// Cursor of the first item, opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    /// Cursor of the last item, opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

/// One page of a server-ordered result set. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PaginatedResult<T> {
    /// Items in server order.
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
    /// Pagination state.
    pub page_info: PageInfo,
    /// Total items across all pages.
    #[serde(default)]
    pub total_count: u64,
}

/// Point-in-time rate limit snapshot. Staleness is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitStatus {
    /// Request quota for the current window.
    pub limit: u32,
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Requests consumed in the current window.
    pub used: u32,
    /// When the quota resets.
    pub reset_at: DateTime<Utc>,
}

impl RateLimitStatus {
    /// Reject internally inconsistent snapshots at decode time.
    pub fn validate(&self) -> DiscussionsResult<()> {
        if self.remaining > self.limit {
            return Err(DiscussionsError::Decode(format!(
                "rate limit remaining {} exceeds limit {}",
                self.remaining, self.limit
            )));
        }
        if self.used > self.limit {
            return Err(DiscussionsError::Decode(format!(
                "rate limit used {} exceeds limit {}",
                self.used, self.limit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discussion_json() -> serde_json::Value {
        serde_json::json!({
            "id": "D_kwDOAbc123",
            "number": 42,
            "title": "Roadmap",
            "body": "What is next?",
            "author": {"login": "octocat"},
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-02T08:30:00Z",
            "comments": {"totalCount": 7},
            "category": {
                "id": "DIC_kwDOAbc456",
                "name": "General",
                "description": "Anything goes",
                "emoji": ":speech_balloon:",
                "isAnswerable": false
            },
            "isAnswered": false
        })
    }

    #[test]
    fn discussion_round_trip_is_lossless() {
        let json = discussion_json();
        let discussion: Discussion = serde_json::from_value(json.clone()).expect("decode");
        assert_eq!(discussion.number, 42);
        assert_eq!(discussion.comment_count(), 7);

        let mut encoded = serde_json::to_value(&discussion).expect("encode");
        // The pinned flag is defaulted on decode and legitimately appears on
        // encode; drop it before comparing against the wire form.
        encoded
            .as_object_mut()
            .expect("object")
            .remove("isPinned");
        assert_eq!(encoded, json);
    }

    #[test]
    fn comment_round_trip_is_lossless() {
        let json = serde_json::json!({
            "id": "DC_kwDOAbc789",
            "body": "Try the beta build",
            "author": {"login": "hubot"},
            "createdAt": "2024-03-01T13:00:00Z",
            "updatedAt": "2024-03-01T13:05:00Z",
            "discussion": {"id": "D_kwDOAbc123"},
            "replyTo": {"id": "DC_kwDOAbc001"},
            "isAnswer": true
        });
        let comment: Comment = serde_json::from_value(json.clone()).expect("decode");
        assert_eq!(comment.discussion_id(), Some("D_kwDOAbc123"));
        assert_eq!(comment.reply_to_id(), Some("DC_kwDOAbc001"));
        assert!(comment.is_answer);
        assert_eq!(serde_json::to_value(&comment).expect("encode"), json);
    }

    #[test]
    fn comment_without_reply_omits_field() {
        let comment = Comment {
            id: "DC_1".to_string(),
            body: "top level".to_string(),
            author: None,
            created_at: "2024-03-01T13:00:00Z".parse().expect("timestamp"),
            updated_at: "2024-03-01T13:00:00Z".parse().expect("timestamp"),
            discussion: Some(NodeRef {
                id: "D_1".to_string(),
            }),
            reply_to: None,
            is_answer: false,
        };
        let encoded = serde_json::to_value(&comment).expect("encode");
        assert!(encoded.get("replyTo").is_none());
        assert!(encoded.get("author").is_none());
    }

    #[test]
    fn rate_limit_rejects_inconsistent_snapshot() {
        let status = RateLimitStatus {
            limit: 5000,
            remaining: 6000,
            used: 0,
            reset_at: Utc::now(),
        };
        assert!(matches!(
            status.validate(),
            Err(DiscussionsError::Decode(_))
        ));

        let status = RateLimitStatus {
            limit: 5000,
            remaining: 4000,
            used: 1000,
            reset_at: Utc::now(),
        };
        assert!(status.validate().is_ok());
    }

    #[test]
    fn page_info_defaults() {
        let info: PageInfo =
            serde_json::from_value(serde_json::json!({"hasNextPage": true})).expect("decode");
        assert!(info.has_next_page);
        assert!(!info.has_previous_page);
        assert!(info.end_cursor.is_none());
    }
}
