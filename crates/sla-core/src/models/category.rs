use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed taxonomy that resource types are classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceCategory {
    Compute,
    SqlDb,
    WebApps,
    Storage,
    Other,
}

impl ServiceCategory {
    /// Every category, `Other` last.
    pub const ALL: [ServiceCategory; 5] = [
        Self::Compute,
        Self::SqlDb,
        Self::WebApps,
        Self::Storage,
        Self::Other,
    ];

    /// Categories reported in the SLA matrix by default.
    pub const TRACKED: [ServiceCategory; 4] =
        [Self::Compute, Self::SqlDb, Self::WebApps, Self::Storage];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::SqlDb => "SqlDb",
            Self::WebApps => "WebApps",
            Self::Storage => "Storage",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown service category '{s}'"))
    }
}
