#![forbid(unsafe_code)]

//! Semantic notifications emitted by the interaction controller.
//!
//! Each variant corresponds to one custom DOM event consumed by the calendar
//! components; [`CalendarNotification::name`] is that event's name. With the
//! `serde` feature a notification encodes as `{"type": name, "detail": {..}}`
//! so a JS host can forward it verbatim as a `CustomEvent`.

use std::sync::mpsc;

use slotgrid_core::{DayHour, Timestamp};
use tracing::warn;

/// A semantic calendar event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        tag = "type",
        content = "detail",
        rename_all = "camelCase",
        rename_all_fields = "camelCase"
    )
)]
pub enum CalendarNotification {
    /// A create gesture began on a grid cell.
    NewSelectStart(DayHour),
    /// The create gesture moved over another grid cell.
    NewSelectMove(DayHour),
    /// The create gesture ended. Carries no bounds.
    NewSelectStop,
    /// A defined selection was dropped on the grid.
    MoveDefinedStop {
        init_start: Timestamp,
        new_start: Timestamp,
        new_end: Timestamp,
    },
    /// A defined selection was dropped on the trash.
    DeleteDefined { init_start: Timestamp },
    /// A resize began; `down_day_hour` stays fixed, `up_day_hour` follows the pointer.
    ResizeDefinedStart {
        down_day_hour: Timestamp,
        up_day_hour: Timestamp,
    },
    ResizeDefinedMove(DayHour),
    ResizeDefinedStop { init_start_day_hour: Timestamp },
}

impl CalendarNotification {
    /// DOM event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NewSelectStart(_) => "newSelectStart",
            Self::NewSelectMove(_) => "newSelectMove",
            Self::NewSelectStop => "newSelectStop",
            Self::MoveDefinedStop { .. } => "moveDefinedStop",
            Self::DeleteDefined { .. } => "deleteDefined",
            Self::ResizeDefinedStart { .. } => "resizeDefinedStart",
            Self::ResizeDefinedMove(_) => "resizeDefinedMove",
            Self::ResizeDefinedStop { .. } => "resizeDefinedStop",
        }
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Receiver of controller notifications.
pub trait NotificationSink {
    fn notify(&mut self, notification: CalendarNotification);
}

impl<F: FnMut(CalendarNotification)> NotificationSink for F {
    fn notify(&mut self, notification: CalendarNotification) {
        self(notification);
    }
}

/// Records notifications in order.
impl NotificationSink for Vec<CalendarNotification> {
    fn notify(&mut self, notification: CalendarNotification) {
        self.push(notification);
    }
}

/// Forwards notifications to another thread. A hung-up receiver drops them.
impl NotificationSink for mpsc::Sender<CalendarNotification> {
    fn notify(&mut self, notification: CalendarNotification) {
        if self.send(notification).is_err() {
            warn!(event = notification.name(), "notification receiver disconnected");
        }
    }
}
