//! Category and relevance classification.
//!
//! `category_of` is an exact lookup. The two relevance checks are loose
//! substring heuristics over free-text labels and are known to misfire:
//!
//! - Over-match: a display name that is a substring of a longer, unrelated
//!   region name matches it (`"East US"` is contained in `"East US 2"`), and
//!   a short alias matches unrelated services (`"Storage"` is contained in
//!   `"Data Lake Storage"`).
//! - Under-match: labels that use neither the region code nor its canonical
//!   display name (`"US East"`, `"Virginia"`) never match.
//!
//! Tests pin this behavior down as-is.

use sla_core::models::{Incident, RegionTarget, ServiceCategory};

/// Known resource types. A type matches an entry exactly or as a
/// sub-resource (`entry/...`).
const TYPE_TABLE: &[(&str, ServiceCategory)] = &[
    ("microsoft.compute/virtualmachines", ServiceCategory::Compute),
    ("microsoft.compute/virtualmachinescalesets", ServiceCategory::Compute),
    ("microsoft.sql/servers/databases", ServiceCategory::SqlDb),
    ("microsoft.sql/managedinstances", ServiceCategory::SqlDb),
    ("microsoft.web/sites", ServiceCategory::WebApps),
    ("microsoft.storage/storageaccounts", ServiceCategory::Storage),
];

const COMPUTE_ALIASES: &[&str] = &["Virtual Machines", "Compute", "Virtual Machine Scale Sets"];
const SQL_ALIASES: &[&str] = &["SQL Database", "SQL Managed Instance", "Azure SQL"];
const WEB_ALIASES: &[&str] = &["App Service", "Web Apps"];
const STORAGE_ALIASES: &[&str] = &["Storage"];

/// Map a raw resource-type string to its category. Unknown types are `Other`.
pub fn category_of(resource_type: &str) -> ServiceCategory {
    let normalized = resource_type.trim().to_ascii_lowercase();
    TYPE_TABLE
        .iter()
        .find(|(known, _)| {
            normalized == *known
                || normalized
                    .strip_prefix(known)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
        .map(|(_, category)| *category)
        .unwrap_or(ServiceCategory::Other)
}

/// Resource types the inventory query asks for.
pub fn tracked_types() -> Vec<&'static str> {
    TYPE_TABLE.iter().map(|(t, _)| *t).collect()
}

/// Service-label aliases for a category. `Other` has none.
pub fn aliases(category: ServiceCategory) -> &'static [&'static str] {
    match category {
        ServiceCategory::Compute => COMPUTE_ALIASES,
        ServiceCategory::SqlDb => SQL_ALIASES,
        ServiceCategory::WebApps => WEB_ALIASES,
        ServiceCategory::Storage => STORAGE_ALIASES,
        ServiceCategory::Other => &[],
    }
}

/// True if `label` equals the region code or contains the display name,
/// both case-insensitively. An empty display name never matches by
/// containment.
pub fn is_region_relevant(label: &str, region_code: &str, region_display_name: &str) -> bool {
    let label = label.trim();
    if !region_code.is_empty() && label.eq_ignore_ascii_case(region_code.trim()) {
        return true;
    }
    let display = region_display_name.trim();
    !display.is_empty() && label.to_lowercase().contains(&display.to_lowercase())
}

/// True if `label` contains any alias of `category`, case-insensitively.
pub fn is_category_relevant(label: &str, category: ServiceCategory) -> bool {
    let label = label.to_lowercase();
    aliases(category)
        .iter()
        .any(|alias| label.contains(&alias.to_lowercase()))
}

/// Region relevance against a resolved target.
pub fn is_relevant_to(label: &str, region: &RegionTarget) -> bool {
    is_region_relevant(label, &region.code, &region.display_name)
}

/// Whether an incident hits the `(region, category)` cell: one impacted
/// service entry must match the category and one of that same entry's
/// region labels must match the region.
pub fn incident_affects(incident: &Incident, region: &RegionTarget, category: ServiceCategory) -> bool {
    incident.impacted_services.iter().any(|entry| {
        is_category_relevant(&entry.service, category)
            && entry.regions.iter().any(|label| is_relevant_to(label, region))
    })
}

/// Incident/timeline table filter: incidents without any region label are
/// kept, others need a label relevant to at least one target region.
pub fn incident_in_scope(incident: &Incident, regions: &[RegionTarget]) -> bool {
    if !incident.has_region_labels() {
        return true;
    }
    incident
        .region_labels()
        .any(|label| regions.iter().any(|region| is_relevant_to(label, region)))
}
