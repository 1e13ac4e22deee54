//! In-memory query service with the remote service's paging rules.
//!
//! Serves fixed row sets per source table, enforces the offset ceiling the
//! way the remote service does, issues continuation tokens while rows
//! remain, and logs every request. Failures can be queued to exercise
//! retry and degradation paths.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde_json::Value;
use sla_core::constants::MAX_PAGE_SIZE;
use sla_core::errors::QueryError;

use crate::query::{is_count_query, source_table};
use crate::service::{PagePosition, QueryPage, QueryRequest, QueryService};

const TOKEN_PREFIX: &str = "mem:";

#[derive(Debug, Clone)]
enum TableState {
    Rows(Vec<Value>),
    Rejected(String),
}

#[derive(Debug)]
pub struct MemoryQueryService {
    default_rows: Vec<Value>,
    tables: HashMap<String, TableState>,
    offset_ceiling: usize,
    failures: Mutex<VecDeque<QueryError>>,
    requests: Mutex<Vec<QueryRequest>>,
}

impl MemoryQueryService {
    /// Serve `rows` for any query whose table has no dedicated row set.
    pub fn new(rows: Vec<Value>, offset_ceiling: usize) -> Self {
        Self {
            default_rows: rows,
            tables: HashMap::new(),
            offset_ceiling,
            failures: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serve `rows` for queries against `table`.
    pub fn with_table(mut self, table: &str, rows: Vec<Value>) -> Self {
        self.tables
            .insert(table.to_ascii_lowercase(), TableState::Rows(rows));
        self
    }

    /// Reject every query against `table`.
    pub fn rejecting(mut self, table: &str, reason: &str) -> Self {
        self.tables.insert(
            table.to_ascii_lowercase(),
            TableState::Rejected(reason.to_string()),
        );
        self
    }

    /// Fail the next request with `error`. Queued failures are consumed in
    /// order, one per request.
    pub fn fail_next(&self, error: QueryError) {
        lock(&self.failures).push_back(error);
    }

    /// Every request received so far, including failed ones.
    pub fn requests(&self) -> Vec<QueryRequest> {
        lock(&self.requests).clone()
    }

    /// Requests excluding pre-flight counts.
    pub fn page_requests(&self) -> Vec<QueryRequest> {
        self.requests()
            .into_iter()
            .filter(|r| !is_count_query(&r.query))
            .collect()
    }

    fn rows_for(&self, query: &str) -> Result<&[Value], QueryError> {
        let table = source_table(query).to_ascii_lowercase();
        match self.tables.get(&table) {
            Some(TableState::Rows(rows)) => Ok(rows),
            Some(TableState::Rejected(reason)) => Err(QueryError::Rejected {
                reason: reason.clone(),
            }),
            None => Ok(&self.default_rows),
        }
    }
}

impl QueryService for MemoryQueryService {
    fn execute(&self, request: &QueryRequest) -> Result<QueryPage, QueryError> {
        lock(&self.requests).push(request.clone());
        if let Some(err) = lock(&self.failures).pop_front() {
            return Err(err);
        }

        let rows = self.rows_for(&request.query)?;
        let total = rows.len() as u64;

        if is_count_query(&request.query) {
            return Ok(QueryPage {
                records: vec![serde_json::json!({ "Count": total })],
                next_token: None,
                total_records: Some(1),
            });
        }

        if request.page_size == 0 || request.page_size > MAX_PAGE_SIZE {
            return Err(QueryError::Rejected {
                reason: format!("page size {} outside 1..={MAX_PAGE_SIZE}", request.page_size),
            });
        }

        let start = match &request.position {
            PagePosition::Offset(offset) if *offset >= self.offset_ceiling => {
                return Err(QueryError::Rejected {
                    reason: format!(
                        "offset {offset} at or beyond ceiling {}; use a continuation token",
                        self.offset_ceiling
                    ),
                });
            }
            PagePosition::Offset(offset) => *offset,
            PagePosition::Token(token) => decode_token(token)?,
        };

        let start = start.min(rows.len());
        let end = (start + request.page_size).min(rows.len());
        let next_token = (end < rows.len()).then(|| encode_token(end));

        Ok(QueryPage {
            records: rows[start..end].to_vec(),
            next_token,
            total_records: Some(total),
        })
    }
}

fn encode_token(offset: usize) -> String {
    format!("{TOKEN_PREFIX}{offset}")
}

fn decode_token(token: &str) -> Result<usize, QueryError> {
    token
        .strip_prefix(TOKEN_PREFIX)
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| QueryError::Rejected {
            reason: format!("invalid continuation token '{token}'"),
        })
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
