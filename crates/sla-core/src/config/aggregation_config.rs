use serde::{Deserialize, Serialize};

use super::defaults;

/// Downtime aggregation and table formatting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Fixed downtime charged per non-available health event (minutes).
    pub event_downtime_minutes: f64,
    /// Maximum characters kept from an incident summary after markup stripping.
    pub summary_max_chars: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            event_downtime_minutes: defaults::DEFAULT_EVENT_DOWNTIME_MINUTES,
            summary_max_chars: defaults::DEFAULT_SUMMARY_MAX_CHARS,
        }
    }
}
