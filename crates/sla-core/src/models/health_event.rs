use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ServiceCategory;

/// Point-in-time health classification of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityState {
    Available,
    Unavailable,
    Degraded,
    Unknown,
}

impl AvailabilityState {
    /// Parse the service's state string. Unrecognised values become `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "available" => Self::Available,
            "unavailable" => Self::Unavailable,
            "degraded" => Self::Degraded,
            _ => Self::Unknown,
        }
    }

    pub fn is_available(self) -> bool {
        self == Self::Available
    }
}

/// A single state-change observation, not an interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEvent {
    pub resource_id: String,
    pub region: String,
    pub category: ServiceCategory,
    pub state: AvailabilityState,
    pub occurred_time: DateTime<Utc>,
}
