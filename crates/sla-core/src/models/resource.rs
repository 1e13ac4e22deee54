use serde::{Deserialize, Serialize};

use super::ServiceCategory;

/// Inventory snapshot of one cloud resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub resource_type: String,
    pub region: String,
    pub category: ServiceCategory,
    pub resource_group: String,
    pub subscription_id: String,
}

impl Resource {
    /// Whether this resource belongs to the `(region, category)` cell.
    pub fn is_in(&self, region_code: &str, category: ServiceCategory) -> bool {
        self.category == category && self.region.eq_ignore_ascii_case(region_code)
    }
}
