#![forbid(unsafe_code)]

//! Web host bridge for the slotgrid calendar grid.
//!
//! # Role in slotgrid
//! `slotgrid-web` owns the gesture logic of the grid. The host (a browser
//! binding, or a replay harness) forwards pointer and touch events together
//! with a [`HitTest`] view of the page; the [`CalendarInteraction`]
//! controller answers with [`SurfaceCommand`]s to apply and
//! [`CalendarNotification`]s for the calendar components.
//!
//! # Design
//! - No DOM types cross this boundary: elements are [`ElementSnapshot`]s
//!   with their `data-*` attributes, points are [`ClientPoint`]s.
//! - Time for the long-press recognizer is supplied by the host.
//! - Every dispatch carries an [`InteractionLogEntry`] for tracing and tests.

pub mod input;
pub mod interaction;
pub mod long_touch;
pub mod notification;
pub mod surface;
pub mod target;

pub use input::{ClientPoint, InputSource, PointerInput, TouchInput, TouchPhase};
pub use interaction::{
    CalendarInteraction, DELETING_CLASS, GestureExit, GestureKind, IgnoredReason,
    InteractionConfig, InteractionDispatch, InteractionLogEntry, InteractionOutcome,
    InteractionPhase, MOVING_CLASS, SurfaceCommand,
};
pub use long_touch::{LongTouchConfig, LongTouchDrag, TouchGesture};
pub use notification::{CalendarNotification, NotificationSink};
pub use surface::{Rect, VirtualSurface};
pub use target::{Dataset, ElementId, ElementSnapshot, GridTarget, HitTest, ResizeEdge};
