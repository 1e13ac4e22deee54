//! PagedFetcher: drains a paged result set completely, or degrades to a
//! flagged partial result.
//!
//! Callers must tolerate at most one missing or duplicated record near a
//! page boundary: ordering across pages is the remote service's guarantee,
//! and no de-duplication is attempted here.

use serde::de::DeserializeOwned;
use serde_json::Value;
use sla_core::config::FetchConfig;
use sla_core::constants::MAX_PAGE_SIZE;
use sla_core::errors::QueryError;
use sla_core::tracing_setup::events;
use sla_core::traits::{Cancellable, CancellationToken};

use crate::cursor::{CursorStep, PaginationCursor};
use crate::query::{count_query, source_table};
use crate::retry::RetryPolicy;
use crate::service::{PagePosition, QueryPage, QueryRequest, QueryService};

/// How a fetch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Every page was retrieved.
    Complete,
    /// Retries ran out on some page; records hold everything before it.
    Partial { reason: String },
    /// The service refused the query. Never retried.
    Rejected { reason: String },
    /// The cancellation token tripped or the deadline passed.
    Cancelled,
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Partial { .. } => "partial",
            Self::Rejected { .. } => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Partial { reason } | Self::Rejected { reason } => Some(reason),
            Self::Complete | Self::Cancelled => None,
        }
    }
}

/// Records retrieved by one fetch, with how it ended.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult<T> {
    pub records: Vec<T>,
    pub outcome: FetchOutcome,
    /// Page responses received (retried attempts not counted).
    pub requests: usize,
    /// Volume reported by the pre-flight count or the service. Informational.
    pub expected_total: Option<u64>,
    /// Rows dropped because they could not be decoded.
    pub skipped: usize,
}

impl<T> FetchResult<T> {
    fn started() -> Self {
        Self {
            records: Vec::new(),
            outcome: FetchOutcome::Complete,
            requests: 0,
            expected_total: None,
            skipped: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_complete()
    }
}

/// Paged bulk retrieval against a [`QueryService`].
#[derive(Debug)]
pub struct PagedFetcher<S> {
    service: S,
    page_size: usize,
    offset_ceiling: usize,
    retry: RetryPolicy,
    preflight: bool,
    cancel: Option<CancellationToken>,
}

impl<S: QueryService> PagedFetcher<S> {
    pub fn new(service: S, config: &FetchConfig) -> Self {
        Self {
            service,
            page_size: config.page_size.clamp(1, MAX_PAGE_SIZE),
            offset_ceiling: config.offset_ceiling.max(1),
            retry: RetryPolicy::from_config(config),
            preflight: config.preflight_count,
            cancel: None,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_preflight(mut self, enabled: bool) -> Self {
        self.preflight = enabled;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn offset_ceiling(&self) -> usize {
        self.offset_ceiling
    }

    /// Retrieve every row of `query` over `scope`.
    ///
    /// Never fails outright: on exhausted retries, rejection, or
    /// cancellation the rows gathered so far are returned with the matching
    /// [`FetchOutcome`].
    pub fn fetch(&self, query: &str, scope: &[String]) -> FetchResult<Value> {
        let label = source_table(query);
        let mut result = FetchResult::started();

        if self.preflight && !self.is_cancelled() {
            match self.count(query, scope) {
                Ok(expected) => {
                    events::preflight_counted(label, expected);
                    result.expected_total = Some(expected);
                }
                Err(e) => tracing::debug!(query = %label, "pre-flight count unavailable: {e}"),
            }
        }

        let mut cursor = PaginationCursor::new();
        loop {
            if self.is_cancelled() {
                result.outcome = FetchOutcome::Cancelled;
                break;
            }

            let request = QueryRequest {
                query: query.to_string(),
                scope: scope.to_vec(),
                page_size: self.page_size,
                position: cursor.position(),
            };

            let page = match self.request_with_retry(label, &request) {
                Ok(page) => page,
                Err(err) => {
                    result.outcome = outcome_for(err, self.retry.max_retries);
                    break;
                }
            };

            result.requests += 1;
            let rows = page.records.len();
            events::page_fetched(label, cursor.phase.as_str(), cursor.offset, rows);
            if result.expected_total.is_none() {
                result.expected_total = page.total_records;
            }
            result.records.extend(page.records);

            match cursor.advance(rows, self.page_size, page.next_token, self.offset_ceiling) {
                CursorStep::Continue => {}
                CursorStep::SwitchedToToken => events::phase_switched(label, cursor.offset),
                CursorStep::Exhausted => break,
            }
        }

        match &result.outcome {
            FetchOutcome::Complete => {
                if let Some(expected) = result.expected_total {
                    if expected != result.records.len() as u64 {
                        tracing::debug!(
                            query = %label,
                            expected,
                            actual = result.records.len(),
                            "row count differs from pre-flight count"
                        );
                    }
                }
                events::fetch_completed(label, result.records.len(), result.requests);
            }
            outcome => events::fetch_degraded(
                label,
                outcome.label(),
                result.records.len(),
                outcome.reason().unwrap_or(""),
            ),
        }

        result
    }

    /// Like [`fetch`](Self::fetch), decoding each row into `T`. Rows that
    /// do not decode are skipped and counted.
    pub fn fetch_as<T: DeserializeOwned>(&self, query: &str, scope: &[String]) -> FetchResult<T> {
        let raw = self.fetch(query, scope);
        let mut records = Vec::with_capacity(raw.records.len());
        let mut skipped = raw.skipped;

        for row in raw.records {
            match serde_json::from_value::<T>(row) {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped += 1;
                    tracing::debug!(query = %source_table(query), "skipping undecodable row: {e}");
                }
            }
        }
        if skipped > 0 {
            tracing::warn!(query = %source_table(query), skipped, "rows skipped during decoding");
        }

        FetchResult {
            records,
            outcome: raw.outcome,
            requests: raw.requests,
            expected_total: raw.expected_total,
            skipped,
        }
    }

    /// Count-only query. Only reports expected volume; never gates a fetch.
    pub fn count(&self, query: &str, scope: &[String]) -> Result<u64, QueryError> {
        let request = QueryRequest {
            query: count_query(query),
            scope: scope.to_vec(),
            page_size: 1,
            position: PagePosition::Offset(0),
        };
        let page = self.request_with_retry(source_table(query), &request)?;
        read_count(&page).ok_or_else(|| QueryError::Decode {
            reason: "count query returned no count".to_string(),
        })
    }

    /// One page request with bounded retries on transient failures.
    fn request_with_retry(&self, label: &str, request: &QueryRequest) -> Result<QueryPage, QueryError> {
        let mut attempt = 0;
        loop {
            match self.service.execute(request) {
                Ok(page) => return Ok(page),
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let backoff = self.retry.backoff_for(attempt);
                    events::retry_scheduled(
                        label,
                        attempt,
                        self.retry.max_retries,
                        backoff,
                        &err.to_string(),
                    );
                    if self.is_cancelled() {
                        return Err(QueryError::Cancelled);
                    }
                    self.pause(backoff);
                    if self.is_cancelled() {
                        return Err(QueryError::Cancelled);
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Sleep for `backoff`, cut short by the deadline if one is set.
    fn pause(&self, backoff: std::time::Duration) {
        let wait = match self.cancel.as_ref().and_then(CancellationToken::remaining) {
            Some(remaining) => backoff.min(remaining),
            None => backoff,
        };
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(Cancellable::is_cancelled)
    }
}

fn outcome_for(err: QueryError, max_retries: u32) -> FetchOutcome {
    match err {
        QueryError::Transient { reason } => FetchOutcome::Partial {
            reason: format!("all {max_retries} retries exhausted: {reason}"),
        },
        QueryError::Rejected { reason } | QueryError::Decode { reason } => {
            FetchOutcome::Rejected { reason }
        }
        QueryError::Cancelled => FetchOutcome::Cancelled,
    }
}

/// First numeric column of the first row, else the service's total.
fn read_count(page: &QueryPage) -> Option<u64> {
    let from_row = page.records.first().and_then(|row| match row {
        Value::Object(map) => map.values().find_map(Value::as_u64),
        Value::Number(n) => n.as_u64(),
        _ => None,
    });
    from_row.or(page.total_records)
}
