//! Query text for the five retrievals of a run.
//!
//! Every query ends in a stable `order by` so offset paging sees a
//! consistent row order across pages.

use chrono::{DateTime, Utc};
use sla_core::models::RegionTarget;
use sla_fetch::{QueryBuilder, SortOrder};

use crate::classifier::tracked_types;
use crate::window::{MonthRange, MonthWindow};

pub const INVENTORY_TABLE: &str = "resources";
pub const HEALTH_TABLE: &str = "healthresources";
pub const SERVICE_HEALTH_TABLE: &str = "servicehealthresources";
pub const ALERTS_TABLE: &str = "alertsmanagementresources";

fn region_codes(regions: &[RegionTarget]) -> Vec<&str> {
    regions.iter().map(|r| r.code.as_str()).collect()
}

/// Tracked resources in the target regions.
pub fn inventory(regions: &[RegionTarget]) -> String {
    QueryBuilder::new(INVENTORY_TABLE)
        .where_type_in(&tracked_types())
        .where_in("location", &region_codes(regions))
        .project(&["id", "type", "location", "resourceGroup", "subscriptionId"])
        .order_by("id", SortOrder::Ascending)
        .build()
}

/// Availability-status observations for tracked resources over `range`.
pub fn health_events(regions: &[RegionTarget], range: &MonthRange) -> String {
    QueryBuilder::new(HEALTH_TABLE)
        .where_eq("type", "microsoft.resourcehealth/availabilitystatuses")
        .extend("resourceId", "tolower(tostring(properties.targetResourceId))")
        .extend("resourceType", "tolower(tostring(properties.targetResourceType))")
        .extend("availabilityState", "tostring(properties.availabilityState)")
        .extend("occurredTime", "todatetime(properties.occurredTime)")
        .where_in("resourceType", &tracked_types())
        .where_in("location", &region_codes(regions))
        .where_between("occurredTime", range.start, range.end)
        .project(&[
            "resourceId",
            "resourceType",
            "location",
            "availabilityState",
            "occurredTime",
        ])
        .order_by("occurredTime", SortOrder::Ascending)
        .build()
}

/// Service-health events whose impact interval overlaps `[start, end]`.
pub fn incidents(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    QueryBuilder::new(SERVICE_HEALTH_TABLE)
        .where_eq("type", "microsoft.resourcehealth/events")
        .extend("eventType", "tostring(properties.EventType)")
        .extend("status", "tostring(properties.Status)")
        .extend("title", "tostring(properties.Title)")
        .extend("summary", "tostring(properties.Summary)")
        .extend("level", "tostring(properties.Level)")
        .extend("impactStart", "todatetime(properties.ImpactStartTime)")
        .extend("impactEnd", "todatetime(properties.ImpactMitigationTime)")
        .extend("impact", "properties.Impact")
        .where_overlaps("impactStart", "impactEnd", start, end)
        .project(&[
            "id = name",
            "eventType",
            "status",
            "title",
            "summary",
            "level",
            "impactStart",
            "impactEnd",
            "impact",
        ])
        .order_by("impactStart", SortOrder::Descending)
        .build()
}

/// Incidents touching the most recent month.
pub fn recent_incidents(window: &MonthWindow) -> String {
    incidents(window.start, window.end)
}

/// Incidents touching any month of the reporting range.
pub fn timeline_incidents(range: &MonthRange) -> String {
    incidents(range.start, range.end)
}

/// Alerts raised within `window`.
pub fn alerts(window: &MonthWindow) -> String {
    QueryBuilder::new(ALERTS_TABLE)
        .where_eq("type", "microsoft.alertsmanagement/alerts")
        .extend("eventTimestamp", "todatetime(properties.essentials.startDateTime)")
        .extend("category", "tostring(properties.essentials.signalType)")
        .extend("level", "tostring(properties.essentials.severity)")
        .extend("operationName", "tostring(properties.essentials.alertRule)")
        .extend("status", "tostring(properties.essentials.alertState)")
        .extend("description", "tostring(properties.essentials.description)")
        .extend("resourceId", "tostring(properties.essentials.targetResource)")
        .where_between("eventTimestamp", window.start, window.end)
        .project(&[
            "eventTimestamp",
            "category",
            "level",
            "operationName",
            "status",
            "description",
            "correlationId = name",
            "subscriptionId",
            "resourceId",
        ])
        .order_by("eventTimestamp", SortOrder::Descending)
        .build()
}
