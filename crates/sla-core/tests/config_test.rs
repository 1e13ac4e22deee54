use std::collections::HashMap;
use std::io::Write;

use sla_core::config::*;
use sla_core::errors::ConfigError;
use sla_core::models::{RegionTarget, ServiceCategory};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = SlaConfig::from_toml("").unwrap();

    assert!(config.scope.regions.is_empty());
    assert_eq!(config.scope.month_count, 12);
    assert!(config.scope.include_current_month);
    assert_eq!(config.scope.categories, ServiceCategory::TRACKED.to_vec());

    assert_eq!(config.fetch.page_size, 1000);
    assert_eq!(config.fetch.offset_ceiling, 5000);
    assert_eq!(config.fetch.max_retries, 3);
    assert!(config.fetch.preflight_count);
    assert!(config.fetch.deadline_secs.is_none());

    assert_eq!(config.aggregation.event_downtime_minutes, 30.0);
    assert_eq!(config.aggregation.summary_max_chars, 500);

    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[scope]
regions = ["eastus", { code = "westeurope", display_name = "Europe West" }]
subscriptions = ["sub-a"]
month_count = 3

[fetch]
page_size = 250
"#;
    let config = SlaConfig::from_toml(toml).unwrap();
    assert_eq!(config.scope.month_count, 3);
    assert_eq!(config.scope.subscriptions, vec!["sub-a".to_string()]);
    assert_eq!(config.fetch.page_size, 250);
    // Non-overridden fields keep defaults
    assert_eq!(config.fetch.offset_ceiling, 5000);
    assert!(config.validate().is_ok());

    let regions = config.regions();
    assert_eq!(regions[0], RegionTarget::new("eastus", "East US"));
    assert_eq!(regions[1], RegionTarget::new("westeurope", "Europe West"));
}

#[test]
fn unknown_region_code_falls_back_to_code_as_display_name() {
    let entry = RegionEntry::Code("moonbase1".into());
    assert_eq!(entry.resolve(), RegionTarget::new("moonbase1", "moonbase1"));
}

#[test]
fn invalid_toml_reports_parse_error() {
    let err = SlaConfig::from_toml("[scope\nmonth_count = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn validation_rejects_bad_values() {
    let mut config = SlaConfig::from_toml(r#"[scope]
regions = ["eastus"]"#)
    .unwrap();
    assert!(config.validate().is_ok());

    config.scope.month_count = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("scope.month_count"));
    config.scope.month_count = 12;

    config.fetch.page_size = 1001;
    assert!(config.validate().is_err());
    config.fetch.page_size = 1000;

    config.aggregation.event_downtime_minutes = 0.0;
    assert!(config.validate().is_err());
    config.aggregation.event_downtime_minutes = 30.0;

    config.scope.regions.clear();
    assert!(config.validate().is_err());
}

#[test]
fn env_overrides_take_precedence_over_file_values() {
    let mut config = SlaConfig::from_toml(r#"[scope]
regions = ["eastus"]
month_count = 6"#)
    .unwrap();
    config
        .apply_env_overrides(env(&[
            ("SLA_REGIONS", "westus2, northeurope=Europe North"),
            ("SLA_MONTH_COUNT", "3"),
            ("SLA_CATEGORIES", "compute,storage"),
            ("SLA_SUBSCRIPTIONS", "s1, s2"),
        ]))
        .unwrap();

    assert_eq!(config.scope.month_count, 3);
    assert_eq!(
        config.scope.categories,
        vec![ServiceCategory::Compute, ServiceCategory::Storage]
    );
    assert_eq!(config.scope.subscriptions, vec!["s1", "s2"]);
    let regions = config.regions();
    assert_eq!(regions[0], RegionTarget::new("westus2", "West US 2"));
    assert_eq!(regions[1], RegionTarget::new("northeurope", "Europe North"));
}

#[test]
fn env_override_with_garbage_number_fails() {
    let mut config = SlaConfig::default();
    let err = config
        .apply_env_overrides(env(&[("SLA_PAGE_SIZE", "lots")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn month_count_is_bounded_above() {
    let mut config = SlaConfig::from_toml("[scope]\nregions = [\"eastus\"]").unwrap();
    config
        .apply_env_overrides(env(&[("SLA_MONTH_COUNT", "4294967295")]))
        .unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "scope.month_count"));

    config.scope.month_count = sla_core::constants::MAX_MONTH_COUNT + 1;
    assert!(config.validate().is_err());
    config.scope.month_count = sla_core::constants::MAX_MONTH_COUNT;
    config.validate().unwrap();
}

#[test]
fn load_reads_toml_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[scope]\nregions = [\"uksouth\"]\n\n[aggregation]\nevent_downtime_minutes = 15.0"
    )
    .unwrap();

    let config = SlaConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.aggregation.event_downtime_minutes, 15.0);
    assert_eq!(config.regions()[0].display_name, "UK South");
}

#[test]
fn load_missing_file_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = SlaConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}
