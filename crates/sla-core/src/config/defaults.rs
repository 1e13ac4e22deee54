// Single source of truth for all default values.

// --- Scope ---
pub const DEFAULT_MONTH_COUNT: u32 = 12;
pub const DEFAULT_INCLUDE_CURRENT_MONTH: bool = true;

// --- Fetch ---
pub const DEFAULT_PAGE_SIZE: usize = 1_000;
pub const DEFAULT_OFFSET_CEILING: usize = 5_000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 500;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 30_000;
pub const DEFAULT_PREFLIGHT_COUNT: bool = true;

// --- Aggregation ---
pub const DEFAULT_EVENT_DOWNTIME_MINUTES: f64 = 30.0;
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 500;

// --- Transport ---
pub const DEFAULT_BASE_URL: &str = "https://management.azure.com";
pub const DEFAULT_API_VERSION: &str = "2022-10-01";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TOKEN_ENV_VAR: &str = "SLA_BEARER_TOKEN";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;
