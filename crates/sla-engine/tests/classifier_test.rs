use chrono::{TimeZone, Utc};
use sla_core::models::{ImpactedService, Incident, RegionTarget, ServiceCategory};
use sla_engine::classifier::*;

fn east_us() -> RegionTarget {
    RegionTarget::new("eastus", "East US")
}

fn incident(entries: &[(&str, &[&str])]) -> Incident {
    Incident {
        id: "INC-1".to_string(),
        event_type: "ServiceIssue".to_string(),
        status: "Resolved".to_string(),
        title: "Degraded connectivity".to_string(),
        summary: String::new(),
        impact_start: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        impact_end: None,
        level: "Warning".to_string(),
        impacted_services: entries
            .iter()
            .map(|(service, regions)| ImpactedService {
                service: service.to_string(),
                regions: regions.iter().map(|r| r.to_string()).collect(),
            })
            .collect(),
    }
}

// ── category_of ───────────────────────────────────────────────────────────

#[test]
fn known_types_map_to_their_category() {
    assert_eq!(category_of("Microsoft.Compute/virtualMachines"), ServiceCategory::Compute);
    assert_eq!(
        category_of("microsoft.compute/virtualmachinescalesets"),
        ServiceCategory::Compute
    );
    assert_eq!(category_of("Microsoft.Sql/servers/databases"), ServiceCategory::SqlDb);
    assert_eq!(category_of("Microsoft.Sql/managedInstances"), ServiceCategory::SqlDb);
    assert_eq!(category_of("Microsoft.Web/sites"), ServiceCategory::WebApps);
    assert_eq!(
        category_of("Microsoft.Storage/storageAccounts"),
        ServiceCategory::Storage
    );
}

#[test]
fn sub_resources_inherit_the_parent_category() {
    assert_eq!(category_of("microsoft.web/sites/slots"), ServiceCategory::WebApps);
}

#[test]
fn unknown_types_are_other() {
    assert_eq!(category_of("microsoft.network/virtualnetworks"), ServiceCategory::Other);
    assert_eq!(category_of(""), ServiceCategory::Other);
    // The SQL server itself is not a database.
    assert_eq!(category_of("microsoft.sql/servers"), ServiceCategory::Other);
    // A longer type name is not a sub-resource.
    assert_eq!(category_of("microsoft.web/sitesextra"), ServiceCategory::Other);
}

#[test]
fn tracked_types_cover_every_tracked_category() {
    let types = tracked_types();
    for category in ServiceCategory::TRACKED {
        assert!(types.iter().any(|t| category_of(t) == category), "{category}");
    }
}

// ── region relevance ──────────────────────────────────────────────────────

#[test]
fn region_matches_code_case_insensitively() {
    assert!(is_region_relevant("EASTUS", "eastus", "East US"));
    assert!(is_region_relevant(" eastus ", "eastus", "East US"));
}

#[test]
fn region_matches_display_name_substring() {
    assert!(is_region_relevant("East US", "eastus", "East US"));
    assert!(is_region_relevant("Azure region: east us", "eastus", "East US"));
}

#[test]
fn region_display_name_over_matches_longer_names() {
    assert!(is_region_relevant("East US 2", "eastus", "East US"));
    assert!(is_region_relevant("East US 2 EUAP", "eastus", "East US"));
}

#[test]
fn region_misses_unconventional_labels() {
    assert!(!is_region_relevant("US East", "eastus", "East US"));
    assert!(!is_region_relevant("Virginia", "eastus", "East US"));
    assert!(!is_region_relevant("West US", "eastus", "East US"));
}

#[test]
fn empty_display_name_only_matches_by_code() {
    assert!(!is_region_relevant("anything", "eastus", ""));
    assert!(is_region_relevant("eastus", "eastus", ""));
}

// ── category relevance ────────────────────────────────────────────────────

#[test]
fn category_matches_alias_substring() {
    assert!(is_category_relevant("Virtual Machines", ServiceCategory::Compute));
    assert!(is_category_relevant("virtual machine scale sets", ServiceCategory::Compute));
    assert!(is_category_relevant("SQL Database", ServiceCategory::SqlDb));
    assert!(is_category_relevant("App Service \\ Web Apps", ServiceCategory::WebApps));
    assert!(is_category_relevant("Storage", ServiceCategory::Storage));
}

#[test]
fn category_alias_over_matches_related_services() {
    assert!(is_category_relevant("Data Lake Storage Gen1", ServiceCategory::Storage));
    assert!(is_category_relevant("Azure Compute Gallery", ServiceCategory::Compute));
}

#[test]
fn category_misses_unlisted_labels() {
    assert!(!is_category_relevant("Azure Functions", ServiceCategory::WebApps));
    assert!(!is_category_relevant("Cosmos DB", ServiceCategory::SqlDb));
}

#[test]
fn other_category_never_matches() {
    assert!(!is_category_relevant("Other", ServiceCategory::Other));
    assert!(!is_category_relevant("", ServiceCategory::Other));
    assert!(aliases(ServiceCategory::Other).is_empty());
}

// ── incident pairing ──────────────────────────────────────────────────────

#[test]
fn incident_affects_requires_service_and_region_in_one_entry() {
    let crossed = incident(&[("Virtual Machines", &["West US"]), ("Storage", &["East US"])]);
    assert!(!incident_affects(&crossed, &east_us(), ServiceCategory::Compute));
    assert!(incident_affects(&crossed, &east_us(), ServiceCategory::Storage));
}

#[test]
fn incident_affects_ignores_entries_without_regions() {
    let global = incident(&[("Virtual Machines", &[])]);
    assert!(!incident_affects(&global, &east_us(), ServiceCategory::Compute));
}

#[test]
fn incident_scope_keeps_unlabelled_incidents() {
    let global = incident(&[("Virtual Machines", &[])]);
    assert!(incident_in_scope(&global, &[east_us()]));
}

#[test]
fn incident_scope_needs_one_relevant_label() {
    let elsewhere = incident(&[("Storage", &["West Europe", "North Europe"])]);
    assert!(!incident_in_scope(&elsewhere, &[east_us()]));

    let mixed = incident(&[("Storage", &["West Europe"]), ("SQL Database", &["East US"])]);
    assert!(incident_in_scope(&mixed, &[east_us()]));
}
