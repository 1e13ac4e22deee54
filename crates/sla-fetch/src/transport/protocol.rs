//! Wire format of the resource-graph query endpoint.

use serde::{Deserialize, Serialize};
use sla_core::errors::QueryError;

use crate::service::{PagePosition, QueryPage, QueryRequest};

/// Result format asking for rows as JSON objects rather than a table.
pub const OBJECT_ARRAY_FORMAT: &str = "objectArray";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOptions {
    #[serde(rename = "$top")]
    pub top: usize,
    #[serde(rename = "$skip", skip_serializing_if = "Option::is_none", default)]
    pub skip: Option<usize>,
    #[serde(rename = "$skipToken", skip_serializing_if = "Option::is_none", default)]
    pub skip_token: Option<String>,
    #[serde(rename = "resultFormat")]
    pub result_format: String,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRequest {
    pub subscriptions: Vec<String>,
    pub query: String,
    pub options: GraphOptions,
}

impl From<&QueryRequest> for GraphRequest {
    fn from(request: &QueryRequest) -> Self {
        let (skip, skip_token) = match &request.position {
            PagePosition::Offset(0) => (None, None),
            PagePosition::Offset(offset) => (Some(*offset), None),
            PagePosition::Token(token) => (None, Some(token.clone())),
        };
        Self {
            subscriptions: request.scope.clone(),
            query: request.query.clone(),
            options: GraphOptions {
                top: request.page_size,
                skip,
                skip_token,
                result_format: OBJECT_ARRAY_FORMAT.to_string(),
            },
        }
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResponse {
    #[serde(default)]
    pub total_records: Option<u64>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    #[serde(rename = "$skipToken", default)]
    pub skip_token: Option<String>,
}

impl From<GraphResponse> for QueryPage {
    fn from(response: GraphResponse) -> Self {
        Self {
            records: response.data,
            next_token: response.skip_token.filter(|t| !t.is_empty()),
            total_records: response.total_records,
        }
    }
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphErrorBody {
    pub error: GraphError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphError {
    pub code: String,
    pub message: String,
}

/// Decode a success body into a page.
pub fn decode_page(body: &str) -> Result<QueryPage, QueryError> {
    serde_json::from_str::<GraphResponse>(body)
        .map(QueryPage::from)
        .map_err(|e| QueryError::Decode {
            reason: format!("deserialization failed: {e}"),
        })
}

/// `code: message` from an error envelope, or the raw body when it is not one.
pub fn error_detail(body: &str) -> String {
    serde_json::from_str::<GraphErrorBody>(body)
        .map(|b| format!("{}: {}", b.error.code, b.error.message))
        .unwrap_or_else(|_| body.to_string())
}

/// Map a non-success status to a query error.
///
/// Timeouts, throttling and server errors are worth another attempt; other
/// client errors mean the query itself is wrong.
pub fn classify(status: u16, detail: &str) -> QueryError {
    let reason = format!("HTTP {status}: {detail}");
    match status {
        408 | 429 | 500..=599 => QueryError::Transient { reason },
        _ => QueryError::Rejected { reason },
    }
}
