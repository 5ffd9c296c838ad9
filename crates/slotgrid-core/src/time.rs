#![forbid(unsafe_code)]

//! Calendar time model: timestamps, grid coordinates and intervals.
//!
//! All instants are millisecond Unix timestamps. Wall-clock questions
//! ("what hour of the day is this?") are answered relative to a
//! [`CalendarZone`], a fixed UTC offset chosen by the embedding UI.
//!
//! # Invariants
//!
//! 1. A [`TimeInterval`] always satisfies `start < end`.
//! 2. [`CalendarZone::quarter_hour_of_day`] is a multiple of `0.25` in `[0, 24]`.
//! 3. [`CalendarZone::start_of_day`] is idempotent.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Milliseconds per minute.
pub const MS_PER_MINUTE: i64 = 60_000;
/// Milliseconds per hour.
pub const MS_PER_HOUR: i64 = 3_600_000;
/// Milliseconds per day.
pub const MS_PER_DAY: i64 = 86_400_000;
/// Default grid resolution in hours (one quarter hour).
pub const QUARTER_HOUR: f64 = 0.25;

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// A millisecond Unix timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(i64);

impl Timestamp {
    /// Construct from milliseconds since the Unix epoch.
    #[must_use]
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    /// Construct from whole seconds since the Unix epoch.
    #[must_use]
    pub const fn from_unix_seconds(secs: i64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Whole seconds since the Unix epoch (floored).
    #[must_use]
    pub const fn unix_seconds(self) -> i64 {
        self.0.div_euclid(1000)
    }

    /// Shift by a fractional number of hours, rounded to the nearest millisecond.
    #[must_use]
    pub fn add_hours(self, hours: f64) -> Self {
        let delta = (hours * MS_PER_HOUR as f64).round() as i64;
        Self(self.0.saturating_add(delta))
    }

    /// Shift by whole minutes.
    #[must_use]
    pub const fn add_minutes(self, minutes: i64) -> Self {
        Self(self.0.saturating_add(minutes.saturating_mul(MS_PER_MINUTE)))
    }

    /// Shift by whole days.
    #[must_use]
    pub const fn add_days(self, days: i64) -> Self {
        Self(self.0.saturating_add(days.saturating_mul(MS_PER_DAY)))
    }

    /// Wall-clock view in `zone`, or `None` when out of chrono's range.
    #[must_use]
    pub fn to_local(self, zone: CalendarZone) -> Option<DateTime<FixedOffset>> {
        DateTime::from_timestamp_millis(self.0).map(|utc| utc.with_timezone(&zone.offset))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp_millis(self.0) {
            Some(utc) => write!(f, "{}", utc.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}

// ---------------------------------------------------------------------------
// CalendarZone
// ---------------------------------------------------------------------------

/// Fixed-offset display zone used to interpret timestamps as wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarZone {
    offset: FixedOffset,
}

impl Default for CalendarZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl CalendarZone {
    /// UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Zone `minutes` east of UTC. Returns `None` outside ±24h.
    #[must_use]
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        let secs = minutes.checked_mul(60)?;
        FixedOffset::east_opt(secs).map(|offset| Self { offset })
    }

    /// The chrono offset.
    #[must_use]
    pub const fn offset(self) -> FixedOffset {
        self.offset
    }

    fn offset_ms(self) -> i64 {
        i64::from(self.offset.local_minus_utc()) * 1000
    }

    /// Milliseconds elapsed since local midnight.
    #[must_use]
    pub fn ms_of_day(self, ts: Timestamp) -> i64 {
        (ts.as_millis() + self.offset_ms()).rem_euclid(MS_PER_DAY)
    }

    /// Local midnight at or before `ts`.
    #[must_use]
    pub fn start_of_day(self, ts: Timestamp) -> Timestamp {
        Timestamp::from_millis(ts.as_millis() - self.ms_of_day(ts))
    }

    /// Local calendar date of `ts`.
    #[must_use]
    pub fn date(self, ts: Timestamp) -> Option<NaiveDate> {
        ts.to_local(self).map(|local| local.date_naive())
    }

    /// Hour of day including quarter-hour fractions.
    ///
    /// Minutes snap to the nearest quarter: `hour + round(minute / 15) / 4`.
    #[must_use]
    pub fn quarter_hour_of_day(self, ts: Timestamp) -> f64 {
        let ms = self.ms_of_day(ts);
        let hour = ms / MS_PER_HOUR;
        let minute = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
        hour as f64 + (minute as f64 / 15.0).round() / 4.0
    }

    /// Like [`quarter_hour_of_day`](Self::quarter_hour_of_day), but an
    /// instant on midnight reads as `24.0`: an interval ending at midnight
    /// ends on the following day.
    #[must_use]
    pub fn end_hour_of_day(self, ts: Timestamp) -> f64 {
        let hour = self.quarter_hour_of_day(ts);
        if hour == 0.0 { 24.0 } else { hour }
    }
}

// ---------------------------------------------------------------------------
// DayHour
// ---------------------------------------------------------------------------

/// A grid coordinate: the local midnight of a day column plus a fractional hour.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DayHour {
    pub day_ms: Timestamp,
    pub hour: f64,
}

impl DayHour {
    #[must_use]
    pub const fn new(day_ms: Timestamp, hour: f64) -> Self {
        Self { day_ms, hour }
    }

    /// The instant this coordinate denotes.
    #[must_use]
    pub fn to_timestamp(self) -> Timestamp {
        self.day_ms.add_hours(self.hour)
    }

    /// Coordinate of `ts` within its local day.
    #[must_use]
    pub fn from_timestamp(ts: Timestamp, zone: CalendarZone) -> Self {
        Self {
            day_ms: zone.start_of_day(ts),
            hour: zone.ms_of_day(ts) as f64 / MS_PER_HOUR as f64,
        }
    }
}

/// Snap `hour` to the nearest multiple of `unit`.
///
/// Ties go toward positive infinity, so `-0.125` snaps to `0.0` on a
/// quarter-hour grid while `0.125` snaps to `0.25`. A non-positive or
/// non-finite unit leaves the value untouched.
#[must_use]
pub fn quantize_hour(hour: f64, unit: f64) -> f64 {
    if !(unit.is_finite() && unit > 0.0) {
        return hour;
    }
    (hour / unit + 0.5).floor() * unit
}

// ---------------------------------------------------------------------------
// TimeInterval
// ---------------------------------------------------------------------------

/// Error constructing a [`TimeInterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    /// `start` was not strictly before `end`.
    NotIncreasing { start: Timestamp, end: Timestamp },
}

impl fmt::Display for IntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotIncreasing { start, end } => write!(
                f,
                "interval start {} is not before end {}",
                start.as_millis(),
                end.as_millis()
            ),
        }
    }
}

impl std::error::Error for IntervalError {}

/// A half-open span of time `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeInterval {
    start: Timestamp,
    end: Timestamp,
}

impl TimeInterval {
    /// Validate and construct.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, IntervalError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(IntervalError::NotIncreasing { start, end })
        }
    }

    #[must_use]
    pub const fn start(&self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Timestamp {
        self.end
    }

    #[must_use]
    pub const fn duration_ms(&self) -> i64 {
        self.end.as_millis() - self.start.as_millis()
    }

    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        self.duration_ms() as f64 / MS_PER_HOUR as f64
    }

    /// Both bounds moved by `hours`.
    #[must_use]
    pub fn shifted_hours(&self, hours: f64) -> Self {
        let start = self.start.add_hours(hours);
        Self {
            start,
            end: Timestamp::from_millis(start.as_millis() + self.duration_ms()),
        }
    }

    #[must_use]
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start <= ts && ts < self.end
    }
}
