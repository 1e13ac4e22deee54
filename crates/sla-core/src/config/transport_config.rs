use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Remote query service endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Base URL of the management API.
    pub base_url: String,
    pub api_version: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Environment variable holding the bearer token. Token acquisition is
    /// handled outside this crate.
    pub token_env_var: String,
}

impl TransportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read the bearer token from the configured environment variable.
    pub fn bearer_token(&self) -> Option<String> {
        std::env::var(&self.token_env_var)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            api_version: defaults::DEFAULT_API_VERSION.to_string(),
            timeout_secs: defaults::DEFAULT_TIMEOUT_SECS,
            token_env_var: defaults::DEFAULT_TOKEN_ENV_VAR.to_string(),
        }
    }
}
