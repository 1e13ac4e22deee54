/// Errors raised while serializing or reading back a run report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("report write failed for {path}: {reason}")]
    Io { path: String, reason: String },
}
