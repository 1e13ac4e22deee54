//! One end-to-end availability run.
//!
//! The five retrievals run one after another: inventory, health events over
//! the full range, incidents for the newest month, incidents for the full
//! range, alerts for the newest month. None of them aborts the run; a
//! degraded fetch becomes a [`RunWarning`] and its section is built from
//! whatever records it returned.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sla_core::constants::{MAX_MONTH_COUNT, VERSION};
use sla_core::models::{Alert, HealthEvent, Incident, RegionTarget, Resource};
use sla_core::tracing_setup::events;
use sla_core::traits::CancellationToken;
use sla_core::{SlaConfig, SlaResult};
use sla_fetch::{PagedFetcher, QueryService};
use uuid::Uuid;

use crate::downtime::DowntimeAggregator;
use crate::matrix::MatrixBuilder;
use crate::queries;
use crate::records::{AlertRow, AvailabilityRow, InventoryRow, ServiceHealthRow};
use crate::report::{MonthDescriptor, RunReport, RunWarning, Section};
use crate::window::{trailing_months, MonthRange, MonthWindow};

/// Records gathered by the retrieval phase of a run.
#[derive(Debug, Default)]
struct Gathered {
    resources: Vec<Resource>,
    health_events: Vec<HealthEvent>,
    recent_incidents: Vec<Incident>,
    timeline_incidents: Vec<Incident>,
    alerts: Vec<Alert>,
    warnings: Vec<RunWarning>,
}

/// Availability run over a [`QueryService`].
#[derive(Debug)]
pub struct AvailabilityRun<S> {
    config: SlaConfig,
    service: S,
    cancel: Option<CancellationToken>,
}

impl<S: QueryService> AvailabilityRun<S> {
    /// `config` is expected to be validated already (see [`SlaConfig::load`]).
    pub fn new(config: SlaConfig, service: S) -> Self {
        Self {
            config,
            service,
            cancel: None,
        }
    }

    /// Cancel the run from outside. Combined with `fetch.deadline_secs`
    /// when both are set.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &SlaConfig {
        &self.config
    }

    /// Execute the run with `now` as the reference instant for month windows.
    pub fn execute(&self, now: DateTime<Utc>) -> RunReport {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("availability_run", %run_id);
        let _enter = span.enter();

        let scope = &self.config.scope;
        let regions = self.config.regions();
        let month_count = scope.month_count.min(MAX_MONTH_COUNT);
        let windows = trailing_months(now, month_count, scope.include_current_month);
        tracing::info!(
            version = VERSION,
            regions = regions.len(),
            categories = scope.categories.len(),
            months = windows.len(),
            "starting availability run"
        );

        let gathered = match (windows.last(), MonthRange::spanning(&windows)) {
            (Some(recent), Some(range)) => self.gather(&regions, recent, &range),
            _ => Gathered::default(),
        };

        let builder = MatrixBuilder::new(
            &regions,
            &scope.categories,
            &windows,
            DowntimeAggregator::from_config(&self.config.aggregation),
            self.config.aggregation.summary_max_chars,
        );
        let sla_matrix = builder.build_sla_matrix(
            &gathered.resources,
            &gathered.health_events,
            &gathered.timeline_incidents,
        );
        let incident_table = builder.build_incident_table(&gathered.recent_incidents, &gathered.alerts);
        let timeline = builder.build_timeline(&gathered.timeline_incidents);

        events::run_completed(
            sla_matrix.len(),
            incident_table.len(),
            timeline.len(),
            gathered.warnings.len(),
        );

        RunReport {
            run_id,
            generated_at: now,
            months: windows.iter().map(MonthDescriptor::from).collect(),
            sla_matrix,
            incident_table,
            timeline,
            warnings: gathered.warnings,
        }
    }

    /// Validate the configuration, execute the run, and write the report
    /// as JSON to `output`.
    pub fn execute_to(&self, now: DateTime<Utc>, output: &Path) -> SlaResult<RunReport> {
        self.config.validate()?;
        let report = self.execute(now);
        report.write_json(output)?;
        Ok(report)
    }

    fn gather(
        &self,
        regions: &[RegionTarget],
        recent: &MonthWindow,
        range: &MonthRange,
    ) -> Gathered {
        let fetcher = self.fetcher();
        let scope = &self.config.scope.subscriptions;
        let mut warnings = Vec::new();

        let resources = fetch_section(
            &fetcher,
            Section::Inventory,
            &queries::inventory(regions),
            scope,
            &mut warnings,
            InventoryRow::into_resource,
        );
        let health_events = fetch_section(
            &fetcher,
            Section::HealthEvents,
            &queries::health_events(regions, range),
            scope,
            &mut warnings,
            AvailabilityRow::into_event,
        );
        let recent_incidents = fetch_section(
            &fetcher,
            Section::RecentIncidents,
            &queries::recent_incidents(recent),
            scope,
            &mut warnings,
            ServiceHealthRow::into_incident,
        );
        let timeline_incidents = fetch_section(
            &fetcher,
            Section::TimelineIncidents,
            &queries::timeline_incidents(range),
            scope,
            &mut warnings,
            ServiceHealthRow::into_incident,
        );
        let alerts = fetch_section(
            &fetcher,
            Section::Alerts,
            &queries::alerts(recent),
            scope,
            &mut warnings,
            AlertRow::into_alert,
        );

        Gathered {
            resources,
            health_events,
            recent_incidents,
            timeline_incidents,
            alerts,
            warnings,
        }
    }

    fn fetcher(&self) -> PagedFetcher<&S> {
        let fetcher = PagedFetcher::new(&self.service, &self.config.fetch);
        let token = match (&self.cancel, self.config.fetch.deadline()) {
            (Some(token), Some(budget)) => Some(token.child_with_timeout(budget)),
            (Some(token), None) => Some(token.clone()),
            (None, Some(budget)) => Some(CancellationToken::with_timeout(budget)),
            (None, None) => None,
        };
        match token {
            Some(token) => fetcher.with_cancellation(token),
            None => fetcher,
        }
    }
}

fn fetch_section<S, T, R>(
    fetcher: &PagedFetcher<S>,
    section: Section,
    query: &str,
    scope: &[String],
    warnings: &mut Vec<RunWarning>,
    convert: impl FnMut(T) -> R,
) -> Vec<R>
where
    S: QueryService,
    T: DeserializeOwned,
{
    let result = fetcher.fetch_as::<T>(query, scope);
    let degraded = RunWarning::from_fetch(section, &result);
    for warning in &degraded {
        tracing::warn!(section = %warning.section, kind = ?warning.kind, "{}", warning.detail);
    }
    warnings.extend(degraded);
    result.records.into_iter().map(convert).collect()
}
