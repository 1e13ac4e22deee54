//! # sla-engine
//!
//! Availability aggregation engine. Turns inventory, health-state events,
//! incidents, and alerts into a region × category × month availability
//! matrix plus incident and timeline tables.
//!
//! Data flow: [`run::AvailabilityRun`] fetches raw rows through
//! `sla-fetch`, [`records`] decodes them and tags each with a category via
//! [`classifier`], [`downtime::DowntimeAggregator`] computes one cell at a
//! time, and [`matrix::MatrixBuilder`] assembles the tables.

pub mod classifier;
pub mod downtime;
pub mod incidents;
pub mod matrix;
pub mod queries;
pub mod records;
pub mod report;
pub mod run;
pub mod text;
pub mod timeline;
pub mod window;

pub use downtime::{DowntimeAggregator, DowntimeBreakdown};
pub use incidents::{IncidentRow, RowSource};
pub use matrix::{MatrixBuilder, SlaRow};
pub use report::{MonthDescriptor, RunReport, RunWarning, Section, WarningKind};
pub use run::AvailabilityRun;
pub use timeline::TimelineRow;
pub use window::{MonthRange, MonthWindow};
