//! GraphQL documents and validated operation builders.
//!
//! Pure: no I/O. Each builder renders the exact document and variable
//! mapping for one logical operation, rejecting structurally invalid
//! inputs before any network call. Optional inputs left as `None` are
//! omitted from the variable map, never sent as `null`. Field selections
//! are fixed per operation; the raw escape hatch in
//! [`Operation::raw`](crate::operation::Operation::raw) is the one
//! exception.

use serde::Serialize;
use serde_json::Value;

use crate::error::{DiscussionsError, DiscussionsResult};
use crate::operation::{Operation, OperationKind};

macro_rules! page_info_fields {
    () => {
        "pageInfo { hasNextPage hasPreviousPage startCursor endCursor }"
    };
}

macro_rules! category_fields {
    () => {
        "id name description emoji isAnswerable"
    };
}

macro_rules! discussion_fields {
    () => {
        "id number title body author { login } createdAt updatedAt \
         comments { totalCount } category { id name description emoji isAnswerable } \
         isAnswered"
    };
}

macro_rules! comment_fields {
    () => {
        "id body author { login } createdAt updatedAt discussion { id } replyTo { id } isAnswer"
    };
}

const REPOSITORY_ID: &str = "query RepositoryId($owner: String!, $name: String!) { \
     repository(owner: $owner, name: $name) { id } }";

const GET_DISCUSSIONS: &str = concat!(
    "query GetDiscussions($owner: String!, $name: String!, $first: Int!, $after: String) { \
     repository(owner: $owner, name: $name) { \
     discussions(first: $first, after: $after) { totalCount ",
    page_info_fields!(),
    " nodes { ",
    discussion_fields!(),
    " } } } }"
);

const GET_DISCUSSION: &str = concat!(
    "query GetDiscussion($owner: String!, $name: String!, $number: Int!) { \
     repository(owner: $owner, name: $name) { discussion(number: $number) { ",
    discussion_fields!(),
    " } } }"
);

const GET_DISCUSSION_COMMENTS: &str = concat!(
    "query GetDiscussionComments($owner: String!, $name: String!, $number: Int!, \
     $first: Int!, $after: String) { \
     repository(owner: $owner, name: $name) { discussion(number: $number) { \
     comments(first: $first, after: $after) { totalCount ",
    page_info_fields!(),
    " nodes { ",
    comment_fields!(),
    " } } } } }"
);

const GET_DISCUSSION_CATEGORIES: &str = concat!(
    "query GetDiscussionCategories($owner: String!, $name: String!, $first: Int!, \
     $after: String) { \
     repository(owner: $owner, name: $name) { \
     discussionCategories(first: $first, after: $after) { totalCount ",
    page_info_fields!(),
    " nodes { ",
    category_fields!(),
    " } } } }"
);

const GET_PINNED_DISCUSSIONS: &str = concat!(
    "query GetPinnedDiscussions($owner: String!, $name: String!, $first: Int!, \
     $after: String) { \
     repository(owner: $owner, name: $name) { \
     pinnedDiscussions(first: $first, after: $after) { totalCount ",
    page_info_fields!(),
    " nodes { discussion { ",
    discussion_fields!(),
    " } } } } }"
);

const GET_RATE_LIMIT: &str =
    "query RateLimit { rateLimit { limit remaining used resetAt } }";

const CREATE_DISCUSSION: &str = concat!(
    "mutation CreateDiscussion($repositoryId: ID!, $categoryId: ID!, $title: String!, \
     $body: String!) { \
     createDiscussion(input: {repositoryId: $repositoryId, categoryId: $categoryId, \
     title: $title, body: $body}) { discussion { ",
    discussion_fields!(),
    " } } }"
);

const UPDATE_DISCUSSION: &str = concat!(
    "mutation UpdateDiscussion($discussionId: ID!, $title: String, $body: String) { \
     updateDiscussion(input: {discussionId: $discussionId, title: $title, body: $body}) { \
     discussion { ",
    discussion_fields!(),
    " } } }"
);

const DELETE_DISCUSSION: &str = concat!(
    "mutation DeleteDiscussion($id: ID!) { deleteDiscussion(input: {id: $id}) { \
     discussion { ",
    discussion_fields!(),
    " } } }"
);

const ADD_DISCUSSION_COMMENT: &str = concat!(
    "mutation AddDiscussionComment($discussionId: ID!, $body: String!, $replyToId: ID) { \
     addDiscussionComment(input: {discussionId: $discussionId, body: $body, \
     replyToId: $replyToId}) { comment { ",
    comment_fields!(),
    " } } }"
);

const UPDATE_DISCUSSION_COMMENT: &str = concat!(
    "mutation UpdateDiscussionComment($commentId: ID!, $body: String!) { \
     updateDiscussionComment(input: {commentId: $commentId, body: $body}) { comment { ",
    comment_fields!(),
    " } } }"
);

const DELETE_DISCUSSION_COMMENT: &str = concat!(
    "mutation DeleteDiscussionComment($id: ID!) { \
     deleteDiscussionComment(input: {id: $id}) { comment { ",
    comment_fields!(),
    " } } }"
);

const MARK_COMMENT_AS_ANSWER: &str = concat!(
    "mutation MarkCommentAsAnswer($id: ID!) { \
     markDiscussionCommentAsAnswer(input: {id: $id}) { discussion { ",
    discussion_fields!(),
    " } } }"
);

const UNMARK_COMMENT_AS_ANSWER: &str = concat!(
    "mutation UnmarkCommentAsAnswer($id: ID!) { \
     unmarkDiscussionCommentAsAnswer(input: {id: $id}) { discussion { ",
    discussion_fields!(),
    " } } }"
);

const PIN_DISCUSSION: &str = concat!(
    "mutation PinDiscussion($discussionId: ID!) { \
     pinDiscussion(input: {discussionId: $discussionId}) { discussion { ",
    discussion_fields!(),
    " } } }"
);

const UNPIN_DISCUSSION: &str = concat!(
    "mutation UnpinDiscussion($discussionId: ID!) { \
     unpinDiscussion(input: {discussionId: $discussionId}) { discussion { ",
    discussion_fields!(),
    " } } }"
);

#[derive(Debug, Serialize)]
struct RepositoryVars<'a> {
    owner: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct ConnectionVars<'a> {
    owner: &'a str,
    name: &'a str,
    first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DiscussionVars<'a> {
    owner: &'a str,
    name: &'a str,
    number: u64,
}

#[derive(Debug, Serialize)]
struct CommentsVars<'a> {
    owner: &'a str,
    name: &'a str,
    number: u64,
    first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDiscussionVars<'a> {
    repository_id: &'a str,
    category_id: &'a str,
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateDiscussionVars<'a> {
    discussion_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct IdVars<'a> {
    id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiscussionIdVars<'a> {
    discussion_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddCommentVars<'a> {
    discussion_id: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCommentVars<'a> {
    comment_id: &'a str,
    body: &'a str,
}

fn require_non_empty(field: &str, value: &str) -> DiscussionsResult<()> {
    if value.trim().is_empty() {
        return Err(DiscussionsError::Validation(format!(
            "`{field}` must not be empty"
        )));
    }
    Ok(())
}

fn require_page_size(first: u32) -> DiscussionsResult<()> {
    if !(1..=100).contains(&first) {
        return Err(DiscussionsError::Validation(format!(
            "`first` must be between 1 and 100, got {first}"
        )));
    }
    Ok(())
}

fn operation<V: Serialize>(
    query: &'static str,
    name: &'static str,
    variables: &V,
    kind: OperationKind,
) -> DiscussionsResult<Operation> {
    Ok(Operation::new(
        query,
        name,
        serde_json::to_value(variables)?,
        kind,
    ))
}

pub(crate) fn repository_id(owner: &str, repo: &str) -> DiscussionsResult<Operation> {
    require_non_empty("owner", owner)?;
    require_non_empty("repo", repo)?;
    operation(
        REPOSITORY_ID,
        "RepositoryId",
        &RepositoryVars { owner, name: repo },
        OperationKind::Query,
    )
}

pub(crate) fn get_discussions(
    owner: &str,
    repo: &str,
    first: u32,
    after: Option<&str>,
) -> DiscussionsResult<Operation> {
    require_non_empty("owner", owner)?;
    require_non_empty("repo", repo)?;
    require_page_size(first)?;
    operation(
        GET_DISCUSSIONS,
        "GetDiscussions",
        &ConnectionVars {
            owner,
            name: repo,
            first,
            after,
        },
        OperationKind::Query,
    )
}

pub(crate) fn get_discussion(
    owner: &str,
    repo: &str,
    number: u64,
) -> DiscussionsResult<Operation> {
    require_non_empty("owner", owner)?;
    require_non_empty("repo", repo)?;
    operation(
        GET_DISCUSSION,
        "GetDiscussion",
        &DiscussionVars {
            owner,
            name: repo,
            number,
        },
        OperationKind::Query,
    )
}

pub(crate) fn get_discussion_comments(
    owner: &str,
    repo: &str,
    number: u64,
    first: u32,
    after: Option<&str>,
) -> DiscussionsResult<Operation> {
    require_non_empty("owner", owner)?;
    require_non_empty("repo", repo)?;
    require_page_size(first)?;
    operation(
        GET_DISCUSSION_COMMENTS,
        "GetDiscussionComments",
        &CommentsVars {
            owner,
            name: repo,
            number,
            first,
            after,
        },
        OperationKind::Query,
    )
}

pub(crate) fn get_discussion_categories(
    owner: &str,
    repo: &str,
    first: u32,
    after: Option<&str>,
) -> DiscussionsResult<Operation> {
    require_non_empty("owner", owner)?;
    require_non_empty("repo", repo)?;
    require_page_size(first)?;
    operation(
        GET_DISCUSSION_CATEGORIES,
        "GetDiscussionCategories",
        &ConnectionVars {
            owner,
            name: repo,
            first,
            after,
        },
        OperationKind::Query,
    )
}

pub(crate) fn get_pinned_discussions(
    owner: &str,
    repo: &str,
    first: u32,
    after: Option<&str>,
) -> DiscussionsResult<Operation> {
    require_non_empty("owner", owner)?;
    require_non_empty("repo", repo)?;
    require_page_size(first)?;
    operation(
        GET_PINNED_DISCUSSIONS,
        "GetPinnedDiscussions",
        &ConnectionVars {
            owner,
            name: repo,
            first,
            after,
        },
        OperationKind::Query,
    )
}

pub(crate) fn get_rate_limit_status() -> DiscussionsResult<Operation> {
    operation(
        GET_RATE_LIMIT,
        "RateLimit",
        &serde_json::Map::new(),
        OperationKind::Query,
    )
}

pub(crate) fn create_discussion(
    repository_id: &str,
    category_id: &str,
    title: &str,
    body: &str,
) -> DiscussionsResult<Operation> {
    require_non_empty("repository_id", repository_id)?;
    require_non_empty("category_id", category_id)?;
    require_non_empty("title", title)?;
    require_non_empty("body", body)?;
    operation(
        CREATE_DISCUSSION,
        "CreateDiscussion",
        &CreateDiscussionVars {
            repository_id,
            category_id,
            title,
            body,
        },
        OperationKind::Mutation,
    )
}

pub(crate) fn update_discussion(
    discussion_id: &str,
    title: Option<&str>,
    body: Option<&str>,
) -> DiscussionsResult<Operation> {
    require_non_empty("discussion_id", discussion_id)?;
    if title.is_none() && body.is_none() {
        return Err(DiscussionsError::Validation(
            "update_discussion requires at least one of `title` or `body`".to_string(),
        ));
    }
    if let Some(title) = title {
        require_non_empty("title", title)?;
    }
    if let Some(body) = body {
        require_non_empty("body", body)?;
    }
    operation(
        UPDATE_DISCUSSION,
        "UpdateDiscussion",
        &UpdateDiscussionVars {
            discussion_id,
            title,
            body,
        },
        OperationKind::Mutation,
    )
}

pub(crate) fn delete_discussion(discussion_id: &str) -> DiscussionsResult<Operation> {
    require_non_empty("discussion_id", discussion_id)?;
    operation(
        DELETE_DISCUSSION,
        "DeleteDiscussion",
        &IdVars { id: discussion_id },
        OperationKind::Mutation,
    )
}

pub(crate) fn add_discussion_comment(
    discussion_id: &str,
    body: &str,
    reply_to_id: Option<&str>,
) -> DiscussionsResult<Operation> {
    require_non_empty("discussion_id", discussion_id)?;
    require_non_empty("body", body)?;
    if let Some(reply_to_id) = reply_to_id {
        require_non_empty("reply_to_id", reply_to_id)?;
    }
    operation(
        ADD_DISCUSSION_COMMENT,
        "AddDiscussionComment",
        &AddCommentVars {
            discussion_id,
            body,
            reply_to_id,
        },
        OperationKind::Mutation,
    )
}

pub(crate) fn update_discussion_comment(
    comment_id: &str,
    body: &str,
) -> DiscussionsResult<Operation> {
    require_non_empty("comment_id", comment_id)?;
    require_non_empty("body", body)?;
    operation(
        UPDATE_DISCUSSION_COMMENT,
        "UpdateDiscussionComment",
        &UpdateCommentVars { comment_id, body },
        OperationKind::Mutation,
    )
}

pub(crate) fn delete_discussion_comment(comment_id: &str) -> DiscussionsResult<Operation> {
    require_non_empty("comment_id", comment_id)?;
    operation(
        DELETE_DISCUSSION_COMMENT,
        "DeleteDiscussionComment",
        &IdVars { id: comment_id },
        OperationKind::Mutation,
    )
}

pub(crate) fn mark_comment_as_answer(comment_id: &str) -> DiscussionsResult<Operation> {
    require_non_empty("comment_id", comment_id)?;
    operation(
        MARK_COMMENT_AS_ANSWER,
        "MarkCommentAsAnswer",
        &IdVars { id: comment_id },
        OperationKind::Mutation,
    )
}

pub(crate) fn unmark_comment_as_answer(comment_id: &str) -> DiscussionsResult<Operation> {
    require_non_empty("comment_id", comment_id)?;
    operation(
        UNMARK_COMMENT_AS_ANSWER,
        "UnmarkCommentAsAnswer",
        &IdVars { id: comment_id },
        OperationKind::Mutation,
    )
}

pub(crate) fn pin_discussion(discussion_id: &str) -> DiscussionsResult<Operation> {
    require_non_empty("discussion_id", discussion_id)?;
    operation(
        PIN_DISCUSSION,
        "PinDiscussion",
        &DiscussionIdVars { discussion_id },
        OperationKind::Mutation,
    )
}

pub(crate) fn unpin_discussion(discussion_id: &str) -> DiscussionsResult<Operation> {
    require_non_empty("discussion_id", discussion_id)?;
    operation(
        UNPIN_DISCUSSION,
        "UnpinDiscussion",
        &DiscussionIdVars { discussion_id },
        OperationKind::Mutation,
    )
}

pub(crate) fn raw(document: &str, variables: Value) -> Operation {
    Operation::raw(document, variables)
}

/// Response decoding shared by both facades.
///
/// Each helper unwraps the operation-shaped `data` payload down to the
/// record the public method returns. A `null` where an entity was
/// addressed decodes as [`DiscussionsError::NotFound`].
pub(crate) mod decode {
    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use serde_json::Value;

    use crate::error::{DiscussionsError, DiscussionsResult};
    use crate::types::{
        Category, Comment, Discussion, PaginatedResult, RateLimitStatus,
    };

    fn take(value: Value, key: &str) -> DiscussionsResult<Value> {
        let Value::Object(mut map) = value else {
            return Err(DiscussionsError::Decode(format!(
                "expected object while reading `{key}`"
            )));
        };
        map.remove(key)
            .ok_or_else(|| DiscussionsError::Decode(format!("response missing `{key}`")))
    }

    fn non_null(value: Value, what: &str) -> DiscussionsResult<Value> {
        if value.is_null() {
            return Err(DiscussionsError::NotFound {
                message: format!("{what} not found"),
            });
        }
        Ok(value)
    }

    fn from_value<T: DeserializeOwned>(value: Value) -> DiscussionsResult<T> {
        serde_json::from_value(value).map_err(Into::into)
    }

    fn repository(data: Value) -> DiscussionsResult<Value> {
        non_null(take(data, "repository")?, "repository")
    }

    pub fn repository_id(data: Value) -> DiscussionsResult<String> {
        from_value(take(repository(data)?, "id")?)
    }

    pub fn discussions(data: Value) -> DiscussionsResult<PaginatedResult<Discussion>> {
        from_value(take(repository(data)?, "discussions")?)
    }

    pub fn discussion(data: Value) -> DiscussionsResult<Discussion> {
        from_value(non_null(
            take(repository(data)?, "discussion")?,
            "discussion",
        )?)
    }

    pub fn discussion_comments(data: Value) -> DiscussionsResult<PaginatedResult<Comment>> {
        let discussion = non_null(take(repository(data)?, "discussion")?, "discussion")?;
        from_value(take(discussion, "comments")?)
    }

    pub fn categories(data: Value) -> DiscussionsResult<PaginatedResult<Category>> {
        from_value(take(repository(data)?, "discussionCategories")?)
    }

    pub fn pinned_discussions(data: Value) -> DiscussionsResult<PaginatedResult<Discussion>> {
        #[derive(Deserialize)]
        struct PinnedNode {
            discussion: Discussion,
        }

        let page: PaginatedResult<PinnedNode> =
            from_value(take(repository(data)?, "pinnedDiscussions")?)?;
        Ok(PaginatedResult {
            nodes: page
                .nodes
                .into_iter()
                .map(|node| {
                    let mut discussion = node.discussion;
                    discussion.is_pinned = true;
                    discussion
                })
                .collect(),
            page_info: page.page_info,
            total_count: page.total_count,
        })
    }

    pub fn rate_limit(data: Value) -> DiscussionsResult<RateLimitStatus> {
        let status: RateLimitStatus =
            from_value(non_null(take(data, "rateLimit")?, "rateLimit")?)?;
        status.validate()?;
        Ok(status)
    }

    pub fn mutation_discussion(data: Value, field: &str) -> DiscussionsResult<Discussion> {
        let payload = non_null(take(data, field)?, field)?;
        from_value(non_null(take(payload, "discussion")?, "discussion")?)
    }

    pub fn pin_payload(data: Value, field: &str, pinned: bool) -> DiscussionsResult<Discussion> {
        let mut discussion = mutation_discussion(data, field)?;
        discussion.is_pinned = pinned;
        Ok(discussion)
    }

    pub fn mutation_comment(data: Value, field: &str) -> DiscussionsResult<Comment> {
        let payload = non_null(take(data, field)?, field)?;
        from_value(non_null(take(payload, "comment")?, "comment")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_page_size_out_of_bounds() {
        assert!(matches!(
            get_discussions("octo", "hello", 0, None),
            Err(DiscussionsError::Validation(_))
        ));
        assert!(matches!(
            get_discussions("octo", "hello", 101, None),
            Err(DiscussionsError::Validation(_))
        ));
        assert!(get_discussions("octo", "hello", 100, None).is_ok());
    }

    #[test]
    fn rejects_empty_owner_and_repo() {
        assert!(matches!(
            get_discussions("", "hello", 10, None),
            Err(DiscussionsError::Validation(_))
        ));
        assert!(matches!(
            get_discussions("octo", "  ", 10, None),
            Err(DiscussionsError::Validation(_))
        ));
        assert!(matches!(
            repository_id("", ""),
            Err(DiscussionsError::Validation(_))
        ));
    }

    #[test]
    fn omits_absent_cursor_from_variables() {
        let op = get_discussions("octo", "hello", 25, None).expect("build");
        assert_eq!(
            op.variables,
            serde_json::json!({"owner": "octo", "name": "hello", "first": 25})
        );

        let op = get_discussions("octo", "hello", 25, Some("Y3Vyc29y")).expect("build");
        assert_eq!(op.variables["after"], "Y3Vyc29y");
    }

    #[test]
    fn update_discussion_requires_a_change() {
        assert!(matches!(
            update_discussion("D_1", None, None),
            Err(DiscussionsError::Validation(_))
        ));
        let op = update_discussion("D_1", Some("New title"), None).expect("build");
        assert_eq!(op.kind, OperationKind::Mutation);
        assert_eq!(
            op.variables,
            serde_json::json!({"discussionId": "D_1", "title": "New title"})
        );
    }

    #[test]
    fn add_comment_omits_absent_reply_target() {
        let op = add_discussion_comment("D_1", "hello", None).expect("build");
        assert_eq!(
            op.variables,
            serde_json::json!({"discussionId": "D_1", "body": "hello"})
        );

        let op = add_discussion_comment("D_1", "hello", Some("DC_9")).expect("build");
        assert_eq!(op.variables["replyToId"], "DC_9");
    }

    #[test]
    fn queries_and_mutations_carry_their_kind() {
        assert_eq!(
            get_discussion("octo", "hello", 7).expect("build").kind,
            OperationKind::Query
        );
        assert_eq!(
            create_discussion("R_1", "DIC_1", "title", "body")
                .expect("build")
                .kind,
            OperationKind::Mutation
        );
        assert_eq!(
            mark_comment_as_answer("DC_1").expect("build").kind,
            OperationKind::Mutation
        );
    }

    #[test]
    fn decode_unwraps_nested_connections() {
        let data = serde_json::json!({
            "repository": {
                "discussions": {
                    "totalCount": 1,
                    "pageInfo": {"hasNextPage": false, "hasPreviousPage": false},
                    "nodes": [{
                        "id": "D_1",
                        "number": 1,
                        "title": "t",
                        "body": "b",
                        "createdAt": "2024-01-01T00:00:00Z",
                        "updatedAt": "2024-01-01T00:00:00Z",
                        "comments": {"totalCount": 0},
                        "isAnswered": false
                    }]
                }
            }
        });
        let page = decode::discussions(data).expect("decode");
        assert_eq!(page.total_count, 1);
        assert_eq!(page.nodes[0].id, "D_1");
    }

    #[test]
    fn decode_null_repository_is_not_found() {
        let data = serde_json::json!({"repository": null});
        assert!(matches!(
            decode::discussions(data),
            Err(DiscussionsError::NotFound { .. })
        ));
    }

    #[test]
    fn decode_null_discussion_is_not_found() {
        let data = serde_json::json!({"repository": {"discussion": null}});
        assert!(matches!(
            decode::discussion(data),
            Err(DiscussionsError::NotFound { .. })
        ));
    }

    #[test]
    fn decode_pinned_discussions_sets_flag() {
        let data = serde_json::json!({
            "repository": {
                "pinnedDiscussions": {
                    "totalCount": 1,
                    "pageInfo": {"hasNextPage": false, "hasPreviousPage": false},
                    "nodes": [{
                        "discussion": {
                            "id": "D_1",
                            "number": 1,
                            "title": "t",
                            "body": "b",
                            "createdAt": "2024-01-01T00:00:00Z",
                            "updatedAt": "2024-01-01T00:00:00Z",
                            "comments": {"totalCount": 0},
                            "isAnswered": false
                        }
                    }]
                }
            }
        });
        let page = decode::pinned_discussions(data).expect("decode");
        assert!(page.nodes[0].is_pinned);
    }

    #[test]
    fn decode_rate_limit_enforces_consistency() {
        let ok = serde_json::json!({
            "rateLimit": {"limit": 5000, "remaining": 4999, "used": 1,
                           "resetAt": "2024-01-01T01:00:00Z"}
        });
        let status = decode::rate_limit(ok).expect("decode");
        assert_eq!(status.remaining, 4999);

        let bad = serde_json::json!({
            "rateLimit": {"limit": 5000, "remaining": 6000, "used": 1,
                           "resetAt": "2024-01-01T01:00:00Z"}
        });
        assert!(matches!(
            decode::rate_limit(bad),
            Err(DiscussionsError::Decode(_))
        ));
    }
}
