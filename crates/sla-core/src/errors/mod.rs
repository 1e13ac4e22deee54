//! Error handling for the SLA engine.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod query_error;
pub mod report_error;

pub use config_error::ConfigError;
pub use query_error::QueryError;
pub use report_error::ReportError;

/// Aggregate error for operations that cross subsystem boundaries.
#[derive(Debug, thiserror::Error)]
pub enum SlaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Convenience alias used across the workspace.
pub type SlaResult<T> = Result<T, SlaError>;
