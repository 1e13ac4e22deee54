use proptest::prelude::*;
use sla_core::models::{AvailabilityState, ServiceCategory, SlaValue};

fn category() -> impl Strategy<Value = ServiceCategory> {
    prop::sample::select(ServiceCategory::ALL.to_vec())
}

proptest! {
    #[test]
    fn percent_is_clamped_and_rounded(raw in -1.0e6f64..1.0e6) {
        let percent = SlaValue::percent(raw).as_percent().unwrap();
        prop_assert!((0.0..=100.0).contains(&percent));
        prop_assert!(((percent * 10_000.0).round() - percent * 10_000.0).abs() < 1e-6);
        prop_assert!(percent.is_sign_positive());
    }

    #[test]
    fn percent_is_idempotent(raw in 0.0f64..=100.0) {
        let once = SlaValue::percent(raw);
        prop_assert_eq!(SlaValue::percent(once.as_percent().unwrap()), once);
    }

    #[test]
    fn sla_value_survives_json(raw in -10.0f64..110.0, applicable in any::<bool>()) {
        let value = if applicable { SlaValue::percent(raw) } else { SlaValue::NotApplicable };
        let json = serde_json::to_string(&value).unwrap();
        let back: SlaValue = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn category_parses_regardless_of_case_and_padding(
        category in category(),
        upper in any::<bool>(),
        pad in 0usize..3,
    ) {
        let name = if upper {
            category.as_str().to_ascii_uppercase()
        } else {
            category.as_str().to_ascii_lowercase()
        };
        let padded = format!("{0}{name}{0}", " ".repeat(pad));
        prop_assert_eq!(padded.parse::<ServiceCategory>(), Ok(category));
    }

    #[test]
    fn unrecognised_states_are_unknown(raw in "[a-z]{0,12}") {
        prop_assume!(!["available", "unavailable", "degraded"].contains(&raw.as_str()));
        prop_assert_eq!(AvailabilityState::parse(&raw), AvailabilityState::Unknown);
    }
}
