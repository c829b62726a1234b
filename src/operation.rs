//! GraphQL wire types and operation metadata.

use serde::{Deserialize, Serialize};

/// Whether an operation reads or mutates server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Idempotent, read-only operation.
    Query,
    /// Non-idempotent operation that changes server state.
    Mutation,
}

impl OperationKind {
    /// Returns `true` if the operation is safe to retry on transient errors.
    #[must_use]
    pub const fn is_idempotent(self) -> bool {
        matches!(self, Self::Query)
    }

    /// Infer the kind from a raw document's leading keyword.
    ///
    /// Used only by the raw escape hatch, where the document is opaque.
    #[must_use]
    pub fn from_document(document: &str) -> Self {
        if document.trim_start().starts_with("mutation") {
            Self::Mutation
        } else {
            Self::Query
        }
    }
}

/// One executable GraphQL operation: document, variables, and kind.
#[derive(Debug, Clone)]
pub struct Operation {
    /// GraphQL document text.
    pub query: String,
    /// Operation name (used for observability).
    pub operation_name: Option<String>,
    /// Variable mapping, always a JSON object.
    pub variables: serde_json::Value,
    /// Query or mutation.
    pub kind: OperationKind,
}

impl Operation {
    /// Create an operation from a prepared document.
    #[must_use]
    pub fn new(
        query: impl Into<String>,
        operation_name: &str,
        variables: serde_json::Value,
        kind: OperationKind,
    ) -> Self {
        Self {
            query: query.into(),
            operation_name: Some(operation_name.to_string()),
            variables,
            kind,
        }
    }

    /// Create an operation from an arbitrary document, verbatim.
    #[must_use]
    pub fn raw(query: impl Into<String>, variables: serde_json::Value) -> Self {
        let query = query.into();
        let kind = OperationKind::from_document(&query);
        Self {
            query,
            operation_name: None,
            variables,
            kind,
        }
    }

    /// Display name for logging.
    #[must_use]
    pub fn name(&self) -> &str {
        self.operation_name.as_deref().unwrap_or("raw")
    }

    /// Render the `{query, variables, operationName}` request body.
    #[must_use]
    pub fn body(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(
            "query".to_string(),
            serde_json::Value::String(self.query.clone()),
        );
        map.insert("variables".to_string(), self.variables.clone());
        if let Some(name) = &self.operation_name {
            map.insert(
                "operationName".to_string(),
                serde_json::Value::String(name.clone()),
            );
        }
        serde_json::Value::Object(map)
    }
}

/// GraphQL error location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlErrorLocation {
    /// Line number in the query (1-based).
    pub line: u32,
    /// Column number in the query (1-based).
    pub column: u32,
}

/// GraphQL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphqlPathSegment {
    /// Field name.
    Key(String),
    /// Array index.
    Index(i64),
}

/// GraphQL error as returned by GitHub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    /// Human-readable error message.
    pub message: String,
    /// GitHub error type, e.g. `NOT_FOUND` or `RATE_LIMITED`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Location(s) within the query.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<GraphqlErrorLocation>,
    /// Path within the response where the error occurred.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<GraphqlPathSegment>,
    /// Extensions metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

/// GraphQL response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlResponse {
    /// Response data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// GraphQL errors.
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_document() {
        assert_eq!(
            OperationKind::from_document("query GetThing { thing }"),
            OperationKind::Query
        );
        assert_eq!(
            OperationKind::from_document("  mutation CreateThing { thing }"),
            OperationKind::Mutation
        );
        assert_eq!(
            OperationKind::from_document("{ thing }"),
            OperationKind::Query
        );
        assert!(!OperationKind::Mutation.is_idempotent());
        assert!(OperationKind::Query.is_idempotent());
    }

    #[test]
    fn body_omits_missing_operation_name() {
        let op = Operation::raw("{ viewer { login } }", serde_json::json!({}));
        let body = op.body();
        assert!(body.get("operationName").is_none());
        assert_eq!(body["query"], "{ viewer { login } }");
        assert_eq!(op.name(), "raw");
    }

    #[test]
    fn graphql_error_decodes_github_type() {
        let err: GraphqlError = serde_json::from_value(serde_json::json!({
            "message": "Could not resolve to a Repository",
            "type": "NOT_FOUND",
            "path": ["repository"],
            "locations": [{"line": 1, "column": 28}]
        }))
        .expect("decode error");
        assert_eq!(err.error_type.as_deref(), Some("NOT_FOUND"));
        assert_eq!(
            err.path,
            vec![GraphqlPathSegment::Key("repository".to_string())]
        );
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let response: GraphqlResponse = serde_json::from_str("{}").expect("decode");
        assert!(response.data.is_none());
        assert!(response.errors.is_empty());
    }
}
