//! Run report: the three tables plus the non-fatal warnings collected on
//! the way. Serializes to JSON for downstream rendering.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sla_core::errors::ReportError;
use sla_fetch::{FetchOutcome, FetchResult};
use uuid::Uuid;

use crate::incidents::IncidentRow;
use crate::matrix::SlaRow;
use crate::timeline::TimelineRow;
use crate::window::MonthWindow;

/// Retrieval a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Inventory,
    HealthEvents,
    RecentIncidents,
    TimelineIncidents,
    Alerts,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::HealthEvents => "health_events",
            Self::RecentIncidents => "recent_incidents",
            Self::TimelineIncidents => "timeline_incidents",
            Self::Alerts => "alerts",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// Retries ran out; the section holds what was fetched before that.
    PartialResult,
    /// The service refused the query; the section is empty.
    QueryRejected,
    /// The run was cancelled or hit its deadline during this fetch.
    Cancelled,
    /// Some rows could not be decoded and were dropped.
    SkippedRows,
}

/// A non-fatal problem that degraded one section of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunWarning {
    pub section: Section,
    pub kind: WarningKind,
    pub detail: String,
}

impl RunWarning {
    /// Warnings implied by how a fetch ended. Empty for a clean fetch.
    pub fn from_fetch<T>(section: Section, result: &FetchResult<T>) -> Vec<Self> {
        let mut warnings = Vec::new();
        let outcome = match &result.outcome {
            FetchOutcome::Complete => None,
            FetchOutcome::Partial { reason } => Some((WarningKind::PartialResult, reason.clone())),
            FetchOutcome::Rejected { reason } => Some((WarningKind::QueryRejected, reason.clone())),
            FetchOutcome::Cancelled => Some((
                WarningKind::Cancelled,
                format!("cancelled after {} records", result.records.len()),
            )),
        };
        if let Some((kind, detail)) = outcome {
            warnings.push(Self {
                section,
                kind,
                detail,
            });
        }
        if result.skipped > 0 {
            warnings.push(Self {
                section,
                kind: WarningKind::SkippedRows,
                detail: format!("{} undecodable rows skipped", result.skipped),
            });
        }
        warnings
    }
}

/// A reporting month as it appears in the report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDescriptor {
    pub key: String,
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<&MonthWindow> for MonthDescriptor {
    fn from(window: &MonthWindow) -> Self {
        Self {
            key: window.key(),
            label: window.label(),
            start: window.start,
            end: window.end,
        }
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Oldest first.
    pub months: Vec<MonthDescriptor>,
    pub sla_matrix: Vec<SlaRow>,
    pub incident_table: Vec<IncidentRow>,
    pub timeline: Vec<TimelineRow>,
    pub warnings: Vec<RunWarning>,
}

impl RunReport {
    /// True when every retrieval completed cleanly.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings_for(&self, section: Section) -> impl Iterator<Item = &RunWarning> {
        self.warnings.iter().filter(move |w| w.section == section)
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| ReportError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
