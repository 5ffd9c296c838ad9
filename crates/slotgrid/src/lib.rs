#![forbid(unsafe_code)]

//! slotgrid public facade crate.
//!
//! Re-exports the common types of the internal crates and bundles the
//! shared calendar state into a [`CalendarSession`], the usual entry point
//! for an embedding UI.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use slotgrid_core::{
    AvailabilitySlot, CalendarZone, ConfigError, DayColumn, DayHour, GridConfig, IntervalDto,
    IntervalError, LayoutMetrics, SelectionStyle, TimeInterval, Timestamp, UserIntervals,
    days_to_show_with_skip, filter_by_usernames, min_max_usernames, multi_day_selection,
};

// --- Runtime re-exports ----------------------------------------------------

pub use slotgrid_runtime::{
    Derived, DragDropPhase, DragDropState, FormMode, FormState, Observable, Subscription,
    UndoConfig, Undoable, UndoableParts, calendar_selection_enabled,
};

// --- Web re-exports --------------------------------------------------------

pub use slotgrid_web::{
    CalendarInteraction, CalendarNotification, ClientPoint, ElementId, ElementSnapshot, HitTest,
    InteractionConfig, InteractionDispatch, NotificationSink, PointerInput, SurfaceCommand,
    TouchInput,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for slotgrid embedders.
#[derive(Debug)]
pub enum Error {
    /// Configuration failed to load or validate.
    Config(ConfigError),
    /// An interval with `start >= end`.
    Interval(IntervalError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Interval(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Interval(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<IntervalError> for Error {
    fn from(err: IntervalError) -> Self {
        Self::Interval(err)
    }
}

/// Standard result type for slotgrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Session ----------------------------------------------------------------

/// Shared state of one calendar page: the attendee's selections with undo
/// history, the drag-and-drop phase and the open form.
#[derive(Debug, Clone)]
pub struct CalendarSession {
    config: GridConfig,
    selections: Undoable<Vec<TimeInterval>>,
    drag_drop: DragDropState,
    form: FormState,
}

impl CalendarSession {
    /// Validate `config` and start with no selections in viewing mode.
    pub fn new(config: GridConfig) -> Result<Self> {
        let config = config.validated()?;
        let undo = slotgrid_runtime::undo_config(&config);
        Ok(Self {
            config,
            selections: Undoable::with_config(Vec::new(), undo),
            drag_drop: DragDropState::new(),
            form: FormState::default(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub const fn selections(&self) -> &Undoable<Vec<TimeInterval>> {
        &self.selections
    }

    #[must_use]
    pub const fn drag_drop(&self) -> &DragDropState {
        &self.drag_drop
    }

    #[must_use]
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Interaction controller for this session's grid.
    ///
    /// It starts enabled exactly when the open form allows selection and
    /// broadcasts drag phases into [`drag_drop`](Self::drag_drop). Keep it
    /// in sync afterwards by feeding [`selection_enabled`](Self::selection_enabled)
    /// into [`CalendarInteraction::set_enabled`].
    pub fn interaction<S: NotificationSink>(&self, sink: S) -> CalendarInteraction<S> {
        let enabled = self.form.get().allows_selection();
        CalendarInteraction::attach(InteractionConfig::from_grid(&self.config, enabled), sink)
            .with_drag_drop_state(self.drag_drop.clone())
    }

    /// Reactive "grid accepts gestures" flag.
    #[must_use]
    pub fn selection_enabled(&self) -> Derived<bool> {
        calendar_selection_enabled(&self.form)
    }
}

/// Common imports for embedders.
pub mod prelude {
    pub use crate::{
        CalendarInteraction, CalendarNotification, CalendarSession, DayHour, Error, GridConfig,
        HitTest, PointerInput, Result, TimeInterval, Timestamp, TouchInput,
    };

    pub use crate::{core, runtime, web};
}

pub use slotgrid_core as core;
pub use slotgrid_runtime as runtime;
pub use slotgrid_web as web;
