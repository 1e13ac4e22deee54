//! Raw query rows and their conversion into domain models.
//!
//! Row field names follow the projections in [`crate::queries`]. String
//! columns tolerate `null` (the service projects missing properties as
//! null) and empty timestamps read as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use sla_core::models::{
    Alert, AvailabilityState, HealthEvent, ImpactedService, Incident, Resource,
};

use crate::classifier::category_of;

/// One inventory row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub resource_group: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subscription_id: String,
}

impl InventoryRow {
    pub fn into_resource(self) -> Resource {
        Resource {
            category: category_of(&self.resource_type),
            id: self.id,
            resource_type: self.resource_type,
            region: self.location,
            resource_group: self.resource_group,
            subscription_id: self.subscription_id,
        }
    }
}

/// One availability-status observation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRow {
    pub resource_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub resource_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "lenient_string")]
    pub availability_state: String,
    pub occurred_time: DateTime<Utc>,
}

impl AvailabilityRow {
    pub fn into_event(self) -> HealthEvent {
        HealthEvent {
            category: category_of(&self.resource_type),
            state: AvailabilityState::parse(&self.availability_state),
            resource_id: self.resource_id,
            region: self.location,
            occurred_time: self.occurred_time,
        }
    }
}

/// `{"ImpactedRegion": "..."}` inside an impact entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImpactedRegionRow {
    #[serde(rename = "ImpactedRegion", deserialize_with = "lenient_string")]
    pub impacted_region: String,
}

/// One `impact` entry of a service-health event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImpactRow {
    #[serde(rename = "ImpactedService", deserialize_with = "lenient_string")]
    pub impacted_service: String,
    #[serde(rename = "ImpactedRegions", default)]
    pub impacted_regions: Vec<ImpactedRegionRow>,
}

/// One service-health event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealthRow {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub level: String,
    pub impact_start: DateTime<Utc>,
    #[serde(default, deserialize_with = "optional_datetime")]
    pub impact_end: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "impact_entries")]
    pub impact: Vec<ImpactRow>,
}

impl ServiceHealthRow {
    pub fn into_incident(self) -> Incident {
        Incident {
            id: self.id,
            event_type: self.event_type,
            status: self.status,
            title: self.title,
            summary: self.summary,
            impact_start: self.impact_start,
            impact_end: self.impact_end,
            level: self.level,
            impacted_services: self
                .impact
                .into_iter()
                .map(|entry| ImpactedService {
                    service: entry.impacted_service,
                    regions: entry
                        .impacted_regions
                        .into_iter()
                        .map(|r| r.impacted_region)
                        .filter(|r| !r.trim().is_empty())
                        .collect(),
                })
                .collect(),
        }
    }
}

/// One activity-log alert.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRow {
    pub event_timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub level: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub operation_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub correlation_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subscription_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub resource_id: String,
}

impl AlertRow {
    pub fn into_alert(self) -> Alert {
        Alert {
            timestamp: self.event_timestamp,
            category: self.category,
            level: self.level,
            operation_name: self.operation_name,
            status: self.status,
            description: self.description,
            correlation_id: self.correlation_id,
            subscription: self.subscription_id,
            resource_id: self.resource_id,
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn optional_datetime<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}

/// The impact column arrives either as an array or as a JSON-encoded string.
fn impact_entries<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ImpactRow>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let value = match value {
        Value::Null => return Ok(Vec::new()),
        Value::String(raw) if raw.trim().is_empty() => return Ok(Vec::new()),
        Value::String(raw) => serde_json::from_str(&raw).map_err(serde::de::Error::custom)?,
        other => other,
    };
    serde_json::from_value(value).map_err(serde::de::Error::custom)
}
