use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use sla_core::models::{
    AvailabilityState, HealthEvent, ImpactedService, Incident, RegionTarget, ServiceCategory,
    SlaValue,
};
use sla_engine::classifier::{category_of, tracked_types};
use sla_engine::downtime::DowntimeAggregator;
use sla_engine::text::{strip_markup, truncate_summary};
use sla_engine::window::{trailing_months, MonthWindow};

fn region() -> RegionTarget {
    RegionTarget::new("eastus", "East US")
}

fn window() -> MonthWindow {
    MonthWindow::new(2024, 3).unwrap()
}

fn events_at(offsets: &[i64]) -> Vec<HealthEvent> {
    offsets
        .iter()
        .map(|minutes| HealthEvent {
            resource_id: "vm".to_string(),
            region: "eastus".to_string(),
            category: ServiceCategory::Compute,
            state: AvailabilityState::Unavailable,
            occurred_time: window().start + Duration::minutes(*minutes),
        })
        .collect()
}

fn incidents_at(spans: &[(i64, i64)]) -> Vec<Incident> {
    spans
        .iter()
        .enumerate()
        .map(|(i, (offset, length))| {
            let start = window().start + Duration::minutes(*offset);
            Incident {
                id: format!("INC-{i}"),
                event_type: "ServiceIssue".to_string(),
                status: "Resolved".to_string(),
                title: String::new(),
                summary: String::new(),
                impact_start: start,
                impact_end: Some(start + Duration::minutes(*length)),
                level: "Error".to_string(),
                impacted_services: vec![ImpactedService {
                    service: "Virtual Machines".to_string(),
                    regions: vec!["East US".to_string()],
                }],
            }
        })
        .collect()
}

fn availability(events: &[HealthEvent], incidents: &[Incident], resources: usize) -> SlaValue {
    DowntimeAggregator::default().compute_availability(
        events,
        incidents,
        &region(),
        ServiceCategory::Compute,
        &window(),
        resources,
    )
}

proptest! {
    #[test]
    fn availability_stays_within_bounds(
        offsets in prop::collection::vec(-2_000i64..50_000, 0..200),
        spans in prop::collection::vec((-50_000i64..50_000, 0i64..80_000), 0..10),
        resources in 1usize..50,
    ) {
        let value = availability(&events_at(&offsets), &incidents_at(&spans), resources);
        let percent = value.as_percent().unwrap();
        prop_assert!((0.0..=100.0).contains(&percent));
        // At most four decimal places.
        prop_assert!(((percent * 10_000.0).round() - percent * 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn zero_resources_is_always_not_applicable(
        offsets in prop::collection::vec(0i64..40_000, 0..50),
    ) {
        prop_assert_eq!(availability(&events_at(&offsets), &[], 0), SlaValue::NotApplicable);
    }

    #[test]
    fn more_events_never_raise_availability(
        offsets in prop::collection::vec(0i64..40_000, 0..100),
        extra in 0i64..40_000,
    ) {
        let before = availability(&events_at(&offsets), &[], 1).as_percent().unwrap();
        let mut more = offsets.clone();
        more.push(extra);
        let after = availability(&events_at(&more), &[], 1).as_percent().unwrap();
        prop_assert!(after <= before);
    }

    #[test]
    fn truncation_is_bounded_prefix(text in ".{0,700}", max in 1usize..600) {
        let cut = truncate_summary(&text, max);
        let original = text.chars().count();
        if original <= max {
            prop_assert_eq!(cut, text);
        } else {
            prop_assert_eq!(cut.chars().count(), max + 3);
            prop_assert!(cut.ends_with("..."));
            let kept: String = text.chars().take(max).collect();
            prop_assert!(cut.starts_with(&kept));
        }
    }

    #[test]
    fn stripped_text_has_no_tags_or_runs_of_space(text in "[a-zA-Z0-9 .,<>/]{0,120}") {
        let stripped = strip_markup(&text);
        prop_assert!(!stripped.contains("  "));
        prop_assert_eq!(stripped.trim(), stripped.as_str());
        // Every complete `<...>` was removed.
        if let (Some(open), Some(close)) = (stripped.find('<'), stripped.rfind('>')) {
            prop_assert!(open > close);
        }
    }

    #[test]
    fn trailing_months_are_contiguous(
        year in 2000i32..2100,
        month in 1u32..=12,
        count in 1u32..36,
        include_current in any::<bool>(),
    ) {
        let now = Utc.with_ymd_and_hms(year, month, 15, 6, 0, 0).unwrap();
        let windows = trailing_months(now, count, include_current);
        prop_assert_eq!(windows.len(), count as usize);
        for pair in windows.windows(2) {
            prop_assert_eq!(pair[0].end + Duration::seconds(1), pair[1].start);
        }
        let newest = windows.last().unwrap();
        prop_assert_eq!(newest.contains(now), include_current);
    }

    #[test]
    fn category_lookup_ignores_case(index in 0usize..6, upper in any::<bool>()) {
        let types = tracked_types();
        let raw = types[index % types.len()];
        let variant = if upper { raw.to_uppercase() } else { raw.to_string() };
        prop_assert_eq!(category_of(&variant), category_of(raw));
        prop_assert_ne!(category_of(&variant), ServiceCategory::Other);
    }
}
