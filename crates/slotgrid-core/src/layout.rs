#![forbid(unsafe_code)]

//! Calendar geometry: where a selection block sits in a day column, and
//! which day columns to render.

use chrono::NaiveDate;

use crate::time::{CalendarZone, MS_PER_HOUR, TimeInterval, Timestamp};

/// Default height of one hour row, in `rem`.
pub const DEFAULT_ROW_HEIGHT_REM: f64 = 3.0;

/// Vertical scale of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub row_height_rem: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            row_height_rem: DEFAULT_ROW_HEIGHT_REM,
        }
    }
}

impl LayoutMetrics {
    #[must_use]
    pub const fn new(row_height_rem: f64) -> Self {
        Self { row_height_rem }
    }

    /// Offset from the top of the day column for an instant `ms_from_midnight`
    /// into the day.
    #[must_use]
    pub fn top_rem(&self, ms_from_midnight: i64) -> f64 {
        ms_from_midnight as f64 / MS_PER_HOUR as f64 * self.row_height_rem
    }

    /// Block height for a duration.
    #[must_use]
    pub fn height_rem(&self, duration_ms: i64) -> f64 {
        duration_ms as f64 / MS_PER_HOUR as f64 * self.row_height_rem
    }

    /// Absolute-position style for `interval` in its start day's column.
    #[must_use]
    pub fn selection_style(&self, interval: &TimeInterval, zone: CalendarZone) -> SelectionStyle {
        SelectionStyle {
            top_rem: self.top_rem(zone.ms_of_day(interval.start())),
            height_rem: self.height_rem(interval.duration_ms()),
        }
    }
}

/// Position and size of a selection block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionStyle {
    pub top_rem: f64,
    pub height_rem: f64,
}

impl SelectionStyle {
    /// Inline CSS for an absolutely positioned block.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "position: absolute; top: {}rem; height: {}rem",
            self.top_rem, self.height_rem
        )
    }
}

/// A day column to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayColumn {
    /// Local midnight of the day.
    pub day: Timestamp,
    pub date: NaiveDate,
    /// True when at least one day was skipped before this column.
    pub skipped: bool,
}

/// Distinct days covered by `intervals`, in order, flagging gaps.
///
/// `intervals` must be sorted and already split on midnight. The first
/// column is never flagged.
#[must_use]
pub fn days_to_show_with_skip(intervals: &[TimeInterval], zone: CalendarZone) -> Vec<DayColumn> {
    let mut columns: Vec<DayColumn> = Vec::new();
    for interval in intervals {
        let day = zone.start_of_day(interval.start());
        let Some(date) = zone.date(day) else {
            continue;
        };
        let skipped = match columns.last() {
            None => false,
            Some(previous) if previous.date == date => continue,
            Some(previous) => previous.date.succ_opt() != Some(date),
        };
        columns.push(DayColumn { day, date, skipped });
    }
    columns
}
