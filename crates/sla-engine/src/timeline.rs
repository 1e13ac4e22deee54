//! Incident timeline across the whole reporting range, bucketed by month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sla_core::models::{Incident, RegionTarget};

use crate::classifier::incident_in_scope;
use crate::incidents::join_labels;
use crate::text::clean_summary;
use crate::window::{MonthRange, MonthWindow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    /// `YYYY-MM` of the bucket month.
    pub month: String,
    pub month_label: String,
    pub id: String,
    pub title: String,
    pub event_type: String,
    pub status: String,
    pub level: String,
    pub impact_start: DateTime<Utc>,
    pub impact_end: Option<DateTime<Utc>>,
    pub services: String,
    pub regions: String,
    pub summary: String,
}

/// Timeline rows for incidents overlapping `range` that concern the target
/// regions. An incident lands in the month of its impact start, or the
/// range's first month when it started earlier.
///
/// Ordered by month (newest first), then impact start (newest first).
pub fn build_timeline(
    incidents: &[Incident],
    regions: &[RegionTarget],
    range: &MonthRange,
    summary_max_chars: usize,
) -> Vec<TimelineRow> {
    let mut rows: Vec<TimelineRow> = incidents
        .iter()
        .filter(|i| {
            i.impact_start <= range.end && i.impact_end.map_or(true, |end| end >= range.start)
        })
        .filter(|i| incident_in_scope(i, regions))
        .filter_map(|i| {
            let bucket = MonthWindow::containing(i.impact_start.max(range.start))?;
            Some(TimelineRow {
                month: bucket.key(),
                month_label: bucket.label(),
                id: i.id.clone(),
                title: i.title.clone(),
                event_type: i.event_type.clone(),
                status: i.status.clone(),
                level: i.level.clone(),
                impact_start: i.impact_start,
                impact_end: i.impact_end,
                services: join_labels(i.service_labels()),
                regions: join_labels(i.region_labels()),
                summary: clean_summary(&i.summary, summary_max_chars),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.month
            .cmp(&a.month)
            .then_with(|| b.impact_start.cmp(&a.impact_start))
            .then_with(|| a.id.cmp(&b.id))
    });
    rows
}
