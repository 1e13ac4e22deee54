use serde::{Deserialize, Serialize};

/// A target region with its resolved display name, e.g. `eastus` / `East US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionTarget {
    pub code: String,
    pub display_name: String,
}

impl RegionTarget {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }
}
