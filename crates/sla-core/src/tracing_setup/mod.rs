//! Tracing setup: structured logging with event helpers.

pub mod events;

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "SLA_LOG";

/// Initialize the global tracing subscriber.
///
/// Respects `SLA_LOG` for filtering and falls back to the configured level.
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}
