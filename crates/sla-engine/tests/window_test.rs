use chrono::{TimeZone, Utc};
use sla_engine::window::{trailing_months, MonthRange, MonthWindow};

#[test]
fn window_covers_whole_month_with_inclusive_end() {
    let march = MonthWindow::new(2024, 3).unwrap();
    assert_eq!(march.start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    assert_eq!(march.end, Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap());
    assert!(march.contains(march.start));
    assert!(march.contains(march.end));
    assert!(!march.contains(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()));
}

#[test]
fn december_rolls_into_next_year() {
    let december = MonthWindow::new(2023, 12).unwrap();
    assert_eq!(december.end, Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap());
}

#[test]
fn invalid_month_is_none() {
    assert!(MonthWindow::new(2024, 0).is_none());
    assert!(MonthWindow::new(2024, 13).is_none());
}

#[test]
fn total_minutes_is_one_second_short_of_the_calendar_month() {
    let march = MonthWindow::new(2024, 3).unwrap();
    let expected = 31.0 * 1440.0 - 1.0 / 60.0;
    assert!((march.total_minutes() - expected).abs() < 1e-9);

    let leap_february = MonthWindow::new(2024, 2).unwrap();
    let expected = 29.0 * 1440.0 - 1.0 / 60.0;
    assert!((leap_february.total_minutes() - expected).abs() < 1e-9);
}

#[test]
fn key_and_label_formats() {
    let window = MonthWindow::new(2024, 3).unwrap();
    assert_eq!(window.key(), "2024-03");
    assert_eq!(window.label(), "March 2024");
}

#[test]
fn trailing_months_include_current_by_default() {
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
    let keys: Vec<String> = trailing_months(now, 3, true).iter().map(|w| w.key()).collect();
    assert_eq!(keys, vec!["2024-01", "2024-02", "2024-03"]);
}

#[test]
fn trailing_months_can_exclude_current() {
    let now = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
    let keys: Vec<String> = trailing_months(now, 3, false).iter().map(|w| w.key()).collect();
    assert_eq!(keys, vec!["2023-11", "2023-12", "2024-01"]);
}

#[test]
fn trailing_months_zero_count_is_empty() {
    let now = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
    assert!(trailing_months(now, 0, true).is_empty());
}

#[test]
fn range_spans_first_to_last_window() {
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
    let windows = trailing_months(now, 12, true);
    let range = MonthRange::spanning(&windows).unwrap();
    assert_eq!(range.start, Utc.with_ymd_and_hms(2023, 4, 1, 0, 0, 0).unwrap());
    assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap());
    assert!(MonthRange::spanning(&[]).is_none());
}

#[test]
fn clipped_minutes_cuts_at_both_edges() {
    let march = MonthWindow::new(2024, 3).unwrap();
    let before = Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).unwrap();
    let inside = Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
    assert_eq!(march.clipped_minutes(before, inside), 120.0);

    let after = Utc.with_ymd_and_hms(2024, 4, 2, 0, 0, 0).unwrap();
    assert!((march.clipped_minutes(before, after) - march.total_minutes()).abs() < 1e-9);

    // Entirely outside.
    assert_eq!(march.clipped_minutes(before, before), 0.0);
}

#[test]
fn overlap_treats_missing_end_as_ongoing() {
    let march = MonthWindow::new(2024, 3).unwrap();
    let january = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
    assert!(march.overlaps(january, None));
    assert!(!march.overlaps(january, Some(Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap())));
}
