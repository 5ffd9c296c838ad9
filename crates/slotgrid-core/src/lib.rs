#![forbid(unsafe_code)]

//! Core: the calendar time model, grid geometry and configuration.
//!
//! # Role in slotgrid
//! `slotgrid-core` is the data layer. It owns the meaning of a grid cell
//! (a day column plus a quarter-hour row), the [`TimeInterval`] type that
//! selections are made of, and the [`GridConfig`] that tunes everything
//! above it.
//!
//! # How it fits in the system
//! `slotgrid-runtime` stores values built from these types and keeps undo
//! history for them. `slotgrid-web` turns pointer gestures over the grid
//! into notifications phrased in [`DayHour`] and [`Timestamp`] terms.

pub mod availability;
pub mod config;
pub mod interval;
pub mod layout;
pub mod logging;
pub mod time;

pub use availability::{AvailabilitySlot, UserIntervals, filter_by_usernames, min_max_usernames};
pub use config::{ConfigError, GridConfig};
pub use interval::{IntervalDto, multi_day_selection};
pub use layout::{DayColumn, LayoutMetrics, SelectionStyle, days_to_show_with_skip};
pub use time::{
    CalendarZone, DayHour, IntervalError, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, QUARTER_HOUR,
    TimeInterval, Timestamp, quantize_hour,
};
