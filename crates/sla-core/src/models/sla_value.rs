use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{NOT_APPLICABLE_LABEL, PERCENT_DECIMALS};

/// Value of one SLA matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SlaValueRepr", into = "SlaValueRepr")]
pub enum SlaValue {
    /// Availability in [0, 100], rounded to four decimal places.
    Percent(f64),
    /// The region/category pairing has zero resources.
    NotApplicable,
}

impl SlaValue {
    /// Build a percentage cell, rounding and clamping into [0, 100].
    pub fn percent(value: f64) -> Self {
        let rounded = round_to(value, PERCENT_DECIMALS).clamp(0.0, 100.0);
        // Normalize negative zero so it renders as 0.0000.
        Self::Percent(if rounded == 0.0 { 0.0 } else { rounded })
    }

    pub fn as_percent(&self) -> Option<f64> {
        match self {
            Self::Percent(p) => Some(*p),
            Self::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

impl fmt::Display for SlaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{p:.4}"),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE_LABEL),
        }
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Wire form: a bare number or the `N/A` label.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SlaValueRepr {
    Percent(f64),
    Label(String),
}

impl From<SlaValue> for SlaValueRepr {
    fn from(value: SlaValue) -> Self {
        match value {
            SlaValue::Percent(p) => Self::Percent(p),
            SlaValue::NotApplicable => Self::Label(NOT_APPLICABLE_LABEL.to_string()),
        }
    }
}

impl TryFrom<SlaValueRepr> for SlaValue {
    type Error = String;

    fn try_from(repr: SlaValueRepr) -> Result<Self, Self::Error> {
        match repr {
            SlaValueRepr::Percent(p) => Ok(Self::Percent(p)),
            SlaValueRepr::Label(l) if l == NOT_APPLICABLE_LABEL => Ok(Self::NotApplicable),
            SlaValueRepr::Label(l) => Err(format!("unexpected SLA cell label '{l}'")),
        }
    }
}
