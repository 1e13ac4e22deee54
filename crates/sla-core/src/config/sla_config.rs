//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    AggregationConfig, FetchConfig, ObservabilityConfig, RegionEntry, ScopeConfig,
    TransportConfig,
};
use crate::constants::{MAX_MONTH_COUNT, MAX_PAGE_SIZE};
use crate::errors::ConfigError;
use crate::models::{RegionTarget, ServiceCategory};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SLA_*`)
/// 2. Config file (TOML)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SlaConfig {
    pub scope: ScopeConfig,
    pub fetch: FetchConfig,
    pub aggregation: AggregationConfig,
    pub transport: TransportConfig,
    pub observability: ObservabilityConfig,
}

impl SlaConfig {
    /// Load configuration from an optional file, then apply `SLA_*`
    /// environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `SLA_*` overrides read through `lookup`.
    ///
    /// - `SLA_REGIONS`: comma list of `code` or `code=Display Name`
    /// - `SLA_SUBSCRIPTIONS`: comma list of subscription ids
    /// - `SLA_CATEGORIES`: comma list of category names
    /// - `SLA_MONTH_COUNT`, `SLA_PAGE_SIZE`, `SLA_DEADLINE_SECS`
    /// - `SLA_BASE_URL`, `SLA_LOG_LEVEL`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("SLA_REGIONS") {
            let mut regions = Vec::new();
            for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
                let entry = RegionEntry::parse(part).ok_or_else(|| invalid(
                    "SLA_REGIONS",
                    format!("cannot parse region entry '{part}'"),
                ))?;
                regions.push(entry);
            }
            self.scope.regions = regions;
        }
        if let Some(raw) = lookup("SLA_SUBSCRIPTIONS") {
            self.scope.subscriptions = split_list(&raw);
        }
        if let Some(raw) = lookup("SLA_CATEGORIES") {
            let mut categories = Vec::new();
            for part in split_list(&raw) {
                let category = part
                    .parse::<ServiceCategory>()
                    .map_err(|e| invalid("SLA_CATEGORIES", e))?;
                categories.push(category);
            }
            self.scope.categories = categories;
        }
        if let Some(raw) = lookup("SLA_MONTH_COUNT") {
            self.scope.month_count = parse_number("SLA_MONTH_COUNT", &raw)?;
        }
        if let Some(raw) = lookup("SLA_PAGE_SIZE") {
            self.fetch.page_size = parse_number("SLA_PAGE_SIZE", &raw)?;
        }
        if let Some(raw) = lookup("SLA_DEADLINE_SECS") {
            self.fetch.deadline_secs = Some(parse_number("SLA_DEADLINE_SECS", &raw)?);
        }
        if let Some(raw) = lookup("SLA_BASE_URL") {
            self.transport.base_url = raw.trim().to_string();
        }
        if let Some(raw) = lookup("SLA_LOG_LEVEL") {
            self.observability.log_level = raw.trim().to_string();
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scope.regions.is_empty() {
            return Err(invalid("scope.regions", "at least one region is required"));
        }
        if self.scope.regions.iter().any(|r| r.code().trim().is_empty()) {
            return Err(invalid("scope.regions", "region codes must not be empty"));
        }
        if self.scope.month_count == 0 || self.scope.month_count > MAX_MONTH_COUNT {
            return Err(invalid(
                "scope.month_count",
                format!("must be between 1 and {MAX_MONTH_COUNT}"),
            ));
        }
        if self.fetch.page_size == 0 || self.fetch.page_size > MAX_PAGE_SIZE {
            return Err(invalid(
                "fetch.page_size",
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }
        if self.fetch.offset_ceiling == 0 {
            return Err(invalid("fetch.offset_ceiling", "must be greater than 0"));
        }
        if self.fetch.initial_backoff_ms > self.fetch.max_backoff_ms {
            return Err(invalid(
                "fetch.initial_backoff_ms",
                "must not exceed fetch.max_backoff_ms",
            ));
        }
        let minutes = self.aggregation.event_downtime_minutes;
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(invalid(
                "aggregation.event_downtime_minutes",
                "must be a positive number",
            ));
        }
        if self.aggregation.summary_max_chars == 0 {
            return Err(invalid("aggregation.summary_max_chars", "must be greater than 0"));
        }
        Ok(())
    }

    /// Target regions with display names resolved.
    pub fn regions(&self) -> Vec<RegionTarget> {
        self.scope.resolved_regions()
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.into(),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| invalid(field, format!("'{raw}' is not a valid number")))
}
