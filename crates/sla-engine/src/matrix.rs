//! SLA matrix assembly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sla_core::models::{
    Alert, HealthEvent, Incident, RegionTarget, Resource, ServiceCategory, SlaValue,
};
use sla_core::tracing_setup::events;

use crate::downtime::DowntimeAggregator;
use crate::incidents::{build_incident_table, IncidentRow};
use crate::timeline::{build_timeline, TimelineRow};
use crate::window::{MonthRange, MonthWindow};

/// One `(region, category)` row with a value per month key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaRow {
    pub region: String,
    pub region_name: String,
    pub category: ServiceCategory,
    pub resource_count: usize,
    /// Keyed by `YYYY-MM`.
    pub months: BTreeMap<String, SlaValue>,
}

impl SlaRow {
    pub fn value(&self, month_key: &str) -> Option<SlaValue> {
        self.months.get(month_key).copied()
    }

    pub fn is_applicable(&self) -> bool {
        self.resource_count > 0
    }
}

/// Builds the three report tables from fetched records.
#[derive(Debug, Clone)]
pub struct MatrixBuilder<'a> {
    regions: &'a [RegionTarget],
    categories: &'a [ServiceCategory],
    windows: &'a [MonthWindow],
    aggregator: DowntimeAggregator,
    summary_max_chars: usize,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(
        regions: &'a [RegionTarget],
        categories: &'a [ServiceCategory],
        windows: &'a [MonthWindow],
        aggregator: DowntimeAggregator,
        summary_max_chars: usize,
    ) -> Self {
        Self {
            regions,
            categories,
            windows,
            aggregator,
            summary_max_chars,
        }
    }

    /// One row per configured region × category, in configuration order.
    pub fn build_sla_matrix(
        &self,
        resources: &[Resource],
        health_events: &[HealthEvent],
        incidents: &[Incident],
    ) -> Vec<SlaRow> {
        let mut rows = Vec::with_capacity(self.regions.len() * self.categories.len());
        for region in self.regions {
            for &category in self.categories {
                let resource_count = resources
                    .iter()
                    .filter(|r| r.is_in(&region.code, category))
                    .count();

                let months = self
                    .windows
                    .iter()
                    .map(|window| {
                        let value = self.aggregator.compute_availability(
                            health_events,
                            incidents,
                            region,
                            category,
                            window,
                            resource_count,
                        );
                        let key = window.key();
                        events::cell_computed(&region.code, category.as_str(), &key, &value.to_string());
                        (key, value)
                    })
                    .collect();

                rows.push(SlaRow {
                    region: region.code.clone(),
                    region_name: region.display_name.clone(),
                    category,
                    resource_count,
                    months,
                });
            }
        }
        rows
    }

    /// Incident table for the newest window. Empty when there are no windows.
    pub fn build_incident_table(&self, incidents: &[Incident], alerts: &[Alert]) -> Vec<IncidentRow> {
        match self.windows.last() {
            Some(window) => build_incident_table(
                incidents,
                alerts,
                self.regions,
                window,
                self.summary_max_chars,
            ),
            None => Vec::new(),
        }
    }

    /// Timeline over the full window range.
    pub fn build_timeline(&self, incidents: &[Incident]) -> Vec<TimelineRow> {
        match MonthRange::spanning(self.windows) {
            Some(range) => build_timeline(incidents, self.regions, &range, self.summary_max_chars),
            None => Vec::new(),
        }
    }
}
