use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flat activity-log alert record. Related to incidents only by time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub timestamp: DateTime<Utc>,
    pub category: String,
    pub level: String,
    pub operation_name: String,
    pub status: String,
    pub description: String,
    pub correlation_id: String,
    pub subscription: String,
    pub resource_id: String,
}
