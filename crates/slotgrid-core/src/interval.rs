#![forbid(unsafe_code)]

//! Interval wire form and multi-day expansion.

#[cfg(feature = "tracing")]
use crate::logging::debug;
use crate::time::{CalendarZone, IntervalError, MS_PER_DAY, TimeInterval, Timestamp};
#[cfg(not(feature = "tracing"))]
use crate::debug;

/// Unix-second wire form of an interval as exchanged with the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalDto {
    pub beg: i64,
    pub end: i64,
}

impl TimeInterval {
    /// Serialize to whole Unix seconds.
    #[must_use]
    pub fn to_dto(&self) -> IntervalDto {
        IntervalDto {
            beg: self.start().unix_seconds(),
            end: self.end().unix_seconds(),
        }
    }

    /// Deserialize from whole Unix seconds.
    pub fn from_dto(dto: IntervalDto) -> Result<Self, IntervalError> {
        Self::new(
            Timestamp::from_unix_seconds(dto.beg),
            Timestamp::from_unix_seconds(dto.end),
        )
    }
}

/// Expand a selection spanning several days into one interval per day.
///
/// Each produced interval keeps the start's time of day and the end's time
/// of day. An end falling on midnight closes the day at the following
/// midnight. The day count is `floor((end - start) / day) + 1`.
#[must_use]
pub fn multi_day_selection(selection: &TimeInterval, zone: CalendarZone) -> Vec<TimeInterval> {
    let start = selection.start();
    let mut end_on_start_day =
        Timestamp::from_millis(zone.start_of_day(start).as_millis() + zone.ms_of_day(selection.end()));
    if zone.ms_of_day(end_on_start_day) == 0 {
        end_on_start_day = end_on_start_day.add_days(1);
    }

    let span_days = selection.duration_ms().div_euclid(MS_PER_DAY) + 1;
    let days: Vec<TimeInterval> = (0..span_days)
        .filter_map(|i| TimeInterval::new(start.add_days(i), end_on_start_day.add_days(i)).ok())
        .collect();
    if days.len() as i64 != span_days {
        debug!(
            span_days,
            kept = days.len(),
            "daily window ends before it starts; dropped empty days"
        );
    }
    days
}
