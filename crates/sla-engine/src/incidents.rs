//! Incident table for the most recent month: service-health incidents that
//! concern the target regions, plus activity-log alerts raised that month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sla_core::models::{Alert, Incident, RegionTarget};

use crate::classifier::incident_in_scope;
use crate::text::clean_summary;
use crate::window::MonthWindow;

/// Where an incident-table row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowSource {
    Incident,
    Alert,
}

/// One row of the incident table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRow {
    pub source: RowSource,
    /// Impact start for incidents, event time for alerts.
    pub timestamp: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    /// Incident id or alert correlation id.
    pub id: String,
    /// Incident title or alert operation name.
    pub title: String,
    /// Incident event type or alert category.
    pub kind: String,
    pub level: String,
    pub status: String,
    pub services: String,
    pub regions: String,
    pub summary: String,
    pub subscription: String,
    pub resource_id: String,
}

impl IncidentRow {
    pub fn from_incident(incident: &Incident, summary_max_chars: usize) -> Self {
        Self {
            source: RowSource::Incident,
            timestamp: incident.impact_start,
            end: incident.impact_end,
            id: incident.id.clone(),
            title: incident.title.clone(),
            kind: incident.event_type.clone(),
            level: incident.level.clone(),
            status: incident.status.clone(),
            services: join_labels(incident.service_labels()),
            regions: join_labels(incident.region_labels()),
            summary: clean_summary(&incident.summary, summary_max_chars),
            subscription: String::new(),
            resource_id: String::new(),
        }
    }

    pub fn from_alert(alert: &Alert, summary_max_chars: usize) -> Self {
        Self {
            source: RowSource::Alert,
            timestamp: alert.timestamp,
            end: None,
            id: alert.correlation_id.clone(),
            title: alert.operation_name.clone(),
            kind: alert.category.clone(),
            level: alert.level.clone(),
            status: alert.status.clone(),
            services: String::new(),
            regions: String::new(),
            summary: clean_summary(&alert.description, summary_max_chars),
            subscription: alert.subscription.clone(),
            resource_id: alert.resource_id.clone(),
        }
    }
}

/// Rows for `window`, newest first.
pub fn build_incident_table(
    incidents: &[Incident],
    alerts: &[Alert],
    regions: &[RegionTarget],
    window: &MonthWindow,
    summary_max_chars: usize,
) -> Vec<IncidentRow> {
    let mut rows: Vec<IncidentRow> = incidents
        .iter()
        .filter(|i| window.overlaps(i.impact_start, i.impact_end))
        .filter(|i| incident_in_scope(i, regions))
        .map(|i| IncidentRow::from_incident(i, summary_max_chars))
        .collect();

    rows.extend(
        alerts
            .iter()
            .filter(|a| window.contains(a.timestamp))
            .map(|a| IncidentRow::from_alert(a, summary_max_chars)),
    );

    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
    rows
}

/// Join labels with `"; "`, dropping blanks and case-insensitive repeats.
pub(crate) fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    let mut seen: Vec<String> = Vec::new();
    let mut kept: Vec<&str> = Vec::new();
    for label in labels.map(str::trim).filter(|l| !l.is_empty()) {
        let key = label.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            kept.push(label);
        }
    }
    kept.join("; ")
}
