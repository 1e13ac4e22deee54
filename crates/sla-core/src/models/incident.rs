use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One impacted-service entry of an incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactedService {
    /// Free-text service label as reported by the service-health feed.
    pub service: String,
    /// Free-text region labels, usually display names.
    pub regions: Vec<String>,
}

/// A reported service-impacting event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub event_type: String,
    pub status: String,
    pub title: String,
    pub summary: String,
    pub impact_start: DateTime<Utc>,
    /// `None` while the incident is still ongoing.
    pub impact_end: Option<DateTime<Utc>>,
    pub level: String,
    pub impacted_services: Vec<ImpactedService>,
}

impl Incident {
    /// All region labels across every impacted service, in feed order.
    pub fn region_labels(&self) -> impl Iterator<Item = &str> {
        self.impacted_services
            .iter()
            .flat_map(|s| s.regions.iter().map(String::as_str))
    }

    pub fn service_labels(&self) -> impl Iterator<Item = &str> {
        self.impacted_services.iter().map(|s| s.service.as_str())
    }

    pub fn has_region_labels(&self) -> bool {
        self.region_labels().next().is_some()
    }

    pub fn is_ongoing(&self) -> bool {
        self.impact_end.is_none()
    }

    /// End instant used for interval math; ongoing incidents run until `horizon`.
    pub fn end_or(&self, horizon: DateTime<Utc>) -> DateTime<Utc> {
        self.impact_end.unwrap_or(horizon)
    }
}
