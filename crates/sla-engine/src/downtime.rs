//! Per-cell downtime accounting.
//!
//! Two independent sources feed a cell's downtime:
//!
//! - every non-available health event in the window charges a fixed number
//!   of minutes (point observations carry no duration of their own)
//! - every matching incident charges its impact interval clipped to the
//!   window, ongoing incidents running to the window end
//!
//! The sources are summed with no overlap reconciliation, so an outage that
//! shows up as both an event and an incident is counted twice. The sum is
//! clamped to the window length before it becomes a percentage.

use serde::{Deserialize, Serialize};
use sla_core::config::AggregationConfig;
use sla_core::models::{HealthEvent, Incident, RegionTarget, ServiceCategory, SlaValue};

use crate::classifier::incident_affects;
use crate::window::MonthWindow;

/// How a cell's availability figure was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowntimeBreakdown {
    pub total_minutes: f64,
    pub qualifying_events: usize,
    pub event_minutes: f64,
    pub matching_incidents: usize,
    pub incident_minutes: f64,
    /// `event_minutes + incident_minutes`, clamped to `total_minutes`.
    pub downtime_minutes: f64,
}

impl DowntimeBreakdown {
    pub fn availability(&self) -> SlaValue {
        if self.total_minutes <= 0.0 {
            return SlaValue::percent(100.0);
        }
        let up = self.total_minutes - self.downtime_minutes;
        SlaValue::percent(up / self.total_minutes * 100.0)
    }

    /// Whether the raw sum exceeded the window and was clamped.
    pub fn was_clamped(&self) -> bool {
        self.event_minutes + self.incident_minutes > self.total_minutes
    }
}

/// Computes availability for one `(region, category, month)` cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DowntimeAggregator {
    event_downtime_minutes: f64,
}

impl DowntimeAggregator {
    pub fn new(event_downtime_minutes: f64) -> Self {
        Self {
            event_downtime_minutes,
        }
    }

    pub fn from_config(config: &AggregationConfig) -> Self {
        Self::new(config.event_downtime_minutes)
    }

    /// Availability percentage of the cell, or `NotApplicable` when the
    /// cell has no resources.
    pub fn compute_availability(
        &self,
        events: &[HealthEvent],
        incidents: &[Incident],
        region: &RegionTarget,
        category: ServiceCategory,
        window: &MonthWindow,
        resource_count: usize,
    ) -> SlaValue {
        match self.breakdown(events, incidents, region, category, window, resource_count) {
            Some(breakdown) => breakdown.availability(),
            None => SlaValue::NotApplicable,
        }
    }

    /// Downtime components of the cell. `None` when the cell has no resources.
    pub fn breakdown(
        &self,
        events: &[HealthEvent],
        incidents: &[Incident],
        region: &RegionTarget,
        category: ServiceCategory,
        window: &MonthWindow,
        resource_count: usize,
    ) -> Option<DowntimeBreakdown> {
        if resource_count == 0 {
            return None;
        }

        let total_minutes = window.total_minutes();

        let qualifying_events = events
            .iter()
            .filter(|e| event_counts(e, region, category, window))
            .count();
        let event_minutes = qualifying_events as f64 * self.event_downtime_minutes;

        let mut matching_incidents = 0;
        let mut incident_minutes = 0.0;
        for incident in incidents.iter().filter(|i| incident_affects(i, region, category)) {
            let clipped = window.clipped_minutes(incident.impact_start, incident.end_or(window.end));
            if clipped > 0.0 {
                matching_incidents += 1;
                incident_minutes += clipped;
            }
        }

        let downtime_minutes = (event_minutes + incident_minutes).min(total_minutes);

        Some(DowntimeBreakdown {
            total_minutes,
            qualifying_events,
            event_minutes,
            matching_incidents,
            incident_minutes,
            downtime_minutes,
        })
    }
}

impl Default for DowntimeAggregator {
    fn default() -> Self {
        Self::from_config(&AggregationConfig::default())
    }
}

fn event_counts(
    event: &HealthEvent,
    region: &RegionTarget,
    category: ServiceCategory,
    window: &MonthWindow,
) -> bool {
    !event.state.is_available()
        && event.category == category
        && event.region.eq_ignore_ascii_case(&region.code)
        && window.contains(event.occurred_time)
}
