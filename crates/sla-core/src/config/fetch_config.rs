use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Paged retrieval configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Rows requested per page. Never above the service's hard ceiling.
    pub page_size: usize,
    /// Offset at which offset paging stops and token paging takes over.
    pub offset_ceiling: usize,
    /// Retries per page after the first attempt.
    pub max_retries: u32,
    /// Initial backoff (doubles each retry).
    pub initial_backoff_ms: u64,
    /// Backoff cap.
    pub max_backoff_ms: u64,
    /// Wall-clock budget for the whole run, checked between page requests.
    pub deadline_secs: Option<u64>,
    /// Issue a count-only query before each fetch to report expected volume.
    pub preflight_count: bool,
}

impl FetchConfig {
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::DEFAULT_PAGE_SIZE,
            offset_ceiling: defaults::DEFAULT_OFFSET_CEILING,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            initial_backoff_ms: defaults::DEFAULT_INITIAL_BACKOFF_MS,
            max_backoff_ms: defaults::DEFAULT_MAX_BACKOFF_MS,
            deadline_secs: None,
            preflight_count: defaults::DEFAULT_PREFLIGHT_COUNT,
        }
    }
}
