//! Structured log events for fetch and aggregation milestones.
//!
//! Each function emits a `tracing` event with structured fields.

use std::time::Duration;

/// Log one page retrieved from the query service.
pub fn page_fetched(query: &str, phase: &str, offset: usize, rows: usize) {
    tracing::debug!(
        event = "page_fetched",
        query = %query,
        phase = %phase,
        offset = offset,
        rows = rows,
        "page fetched"
    );
}

/// Log a retry about to happen after a transient failure.
pub fn retry_scheduled(query: &str, attempt: u32, max_retries: u32, backoff: Duration, reason: &str) {
    tracing::warn!(
        event = "retry_scheduled",
        query = %query,
        attempt = attempt,
        max_retries = max_retries,
        backoff_ms = backoff.as_millis() as u64,
        reason = %reason,
        "transient failure, retrying"
    );
}

/// Log the one-way switch from offset paging to token paging.
pub fn phase_switched(query: &str, offset: usize) {
    tracing::info!(
        event = "phase_switched",
        query = %query,
        offset = offset,
        "offset ceiling reached, continuing with continuation token"
    );
}

/// Log the expected volume reported by a pre-flight count.
pub fn preflight_counted(query: &str, expected: u64) {
    tracing::info!(
        event = "preflight_counted",
        query = %query,
        expected = expected,
        "pre-flight count"
    );
}

/// Log a fetch that ended without draining the result set.
pub fn fetch_degraded(query: &str, outcome: &str, rows: usize, reason: &str) {
    tracing::warn!(
        event = "fetch_degraded",
        query = %query,
        outcome = %outcome,
        rows = rows,
        reason = %reason,
        "fetch incomplete"
    );
}

/// Log a completed fetch.
pub fn fetch_completed(query: &str, rows: usize, requests: usize) {
    tracing::info!(
        event = "fetch_completed",
        query = %query,
        rows = rows,
        requests = requests,
        "fetch completed"
    );
}

/// Log one computed SLA cell.
pub fn cell_computed(region: &str, category: &str, month: &str, value: &str) {
    tracing::trace!(
        event = "cell_computed",
        region = %region,
        category = %category,
        month = %month,
        value = %value,
        "sla cell computed"
    );
}

/// Log the end of a run.
pub fn run_completed(matrix_rows: usize, incident_rows: usize, timeline_rows: usize, warnings: usize) {
    tracing::info!(
        event = "run_completed",
        matrix_rows = matrix_rows,
        incident_rows = incident_rows,
        timeline_rows = timeline_rows,
        warnings = warnings,
        "availability run completed"
    );
}
