//! Calendar-month reporting windows.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One calendar month, `[first instant, last second]`, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthWindow {
    /// Window for `year`/`month` (1-based). `None` for an invalid month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let start = month_start(year, month)?;
        let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        let end = month_start(next_year, next_month)? - Duration::seconds(1);
        Some(Self { start, end })
    }

    /// The month containing `instant`.
    pub fn containing(instant: DateTime<Utc>) -> Option<Self> {
        Self::new(instant.year(), instant.month())
    }

    pub fn previous(&self) -> Option<Self> {
        let (year, month) = (self.start.year(), self.start.month());
        if month == 1 {
            Self::new(year - 1, 12)
        } else {
            Self::new(year, month - 1)
        }
    }

    /// `YYYY-MM`.
    pub fn key(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }

    /// Human label, e.g. `March 2024`.
    pub fn label(&self) -> String {
        self.start.format("%B %Y").to_string()
    }

    /// Length of the window in minutes. Fractional: the end is one second
    /// before the next month starts.
    pub fn total_minutes(&self) -> f64 {
        minutes_between(self.start, self.end)
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether `[start, end]` touches this window. `end = None` is ongoing.
    pub fn overlaps(&self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> bool {
        start <= self.end && end.map_or(true, |end| end >= self.start)
    }

    /// Minutes of `[start, end]` that fall inside the window.
    pub fn clipped_minutes(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
        let from = start.max(self.start);
        let to = end.min(self.end);
        if to > from {
            minutes_between(from, to)
        } else {
            0.0
        }
    }
}

/// The span from the oldest window's start to the newest window's end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthRange {
    /// Range covering `windows`, which must be ordered oldest to newest.
    pub fn spanning(windows: &[MonthWindow]) -> Option<Self> {
        let first = windows.first()?;
        let last = windows.last()?;
        Some(Self {
            start: first.start,
            end: last.end,
        })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// `count` consecutive months ending at the month containing `now` (or the
/// month before it when `include_current` is false), oldest first.
pub fn trailing_months(now: DateTime<Utc>, count: u32, include_current: bool) -> Vec<MonthWindow> {
    let mut cursor = MonthWindow::containing(now);
    if !include_current {
        cursor = cursor.and_then(|w| w.previous());
    }

    let mut windows = Vec::new();
    for _ in 0..count {
        let Some(window) = cursor else { break };
        windows.push(window);
        cursor = window.previous();
    }
    windows.reverse();
    windows
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}
