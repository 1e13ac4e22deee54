/// SLA engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Longest reporting range, in months, a run accepts.
pub const MAX_MONTH_COUNT: u32 = 120;

/// Hard per-request row ceiling imposed by the remote query service.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Rendered form of a cell whose region/category pairing has no resources.
pub const NOT_APPLICABLE_LABEL: &str = "N/A";

/// Decimal places kept on availability percentages.
pub const PERCENT_DECIMALS: i32 = 4;

/// Suffix appended to summaries cut by truncation.
pub const TRUNCATION_MARKER: &str = "...";
