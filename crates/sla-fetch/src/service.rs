//! Port to the remote, filterable, orderable query service.

use serde::{Deserialize, Serialize};
use sla_core::errors::QueryError;

/// Where a page starts: a row offset or an opaque continuation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PagePosition {
    Offset(usize),
    Token(String),
}

/// One page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    /// Subscription ids (or other scope identifiers) the query runs against.
    pub scope: Vec<String>,
    pub page_size: usize,
    pub position: PagePosition,
}

/// One page of results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryPage {
    pub records: Vec<serde_json::Value>,
    /// Continuation token for the next page, absent when the set is drained.
    pub next_token: Option<String>,
    /// Total matching rows, when the service reports it.
    pub total_records: Option<u64>,
}

/// A remote query service. One call is one page request; retries and
/// paging are the caller's concern.
pub trait QueryService {
    fn execute(&self, request: &QueryRequest) -> Result<QueryPage, QueryError>;
}

impl<T: QueryService + ?Sized> QueryService for &T {
    fn execute(&self, request: &QueryRequest) -> Result<QueryPage, QueryError> {
        (**self).execute(request)
    }
}

impl<T: QueryService + ?Sized> QueryService for Box<T> {
    fn execute(&self, request: &QueryRequest) -> Result<QueryPage, QueryError> {
        (**self).execute(request)
    }
}
