use serde::{Deserialize, Serialize};

use super::{defaults, regions};
use crate::models::{RegionTarget, ServiceCategory};

/// A configured region: either a bare code or a code with an explicit
/// display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionEntry {
    Code(String),
    Named {
        code: String,
        display_name: String,
    },
}

impl RegionEntry {
    pub fn code(&self) -> &str {
        match self {
            Self::Code(code) | Self::Named { code, .. } => code,
        }
    }

    /// Resolve the display name: explicit, then the known-region table,
    /// then the code itself.
    pub fn resolve(&self) -> RegionTarget {
        match self {
            Self::Named { code, display_name } => RegionTarget::new(code.trim(), display_name.trim()),
            Self::Code(code) => {
                let code = code.trim();
                let display = regions::known_display_name(code).unwrap_or(code);
                RegionTarget::new(code, display)
            }
        }
    }

    /// Parse `code` or `code=Display Name`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.split_once('=') {
            Some((code, name)) if !code.trim().is_empty() && !name.trim().is_empty() => {
                Some(Self::Named {
                    code: code.trim().to_string(),
                    display_name: name.trim().to_string(),
                })
            }
            Some(_) => None,
            None => Some(Self::Code(raw.to_string())),
        }
    }
}

/// Which regions, subscriptions, categories, and months a run covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub regions: Vec<RegionEntry>,
    /// Subscription ids passed to every query as its scope.
    pub subscriptions: Vec<String>,
    /// Categories reported in the SLA matrix, in row order.
    pub categories: Vec<ServiceCategory>,
    /// Number of trailing calendar months.
    pub month_count: u32,
    /// Whether the month containing "now" is the newest window.
    pub include_current_month: bool,
}

impl ScopeConfig {
    pub fn resolved_regions(&self) -> Vec<RegionTarget> {
        self.regions.iter().map(RegionEntry::resolve).collect()
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            subscriptions: Vec::new(),
            categories: ServiceCategory::TRACKED.to_vec(),
            month_count: defaults::DEFAULT_MONTH_COUNT,
            include_current_month: defaults::DEFAULT_INCLUDE_CURRENT_MONTH,
        }
    }
}
