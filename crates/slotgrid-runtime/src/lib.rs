#![forbid(unsafe_code)]

//! Runtime: reactive stores shared by the calendar UI.
//!
//! # Role in slotgrid
//! `slotgrid-runtime` holds application state that several components read
//! and write: the selected intervals (usually wrapped in [`Undoable`]), the
//! current [`DragDropPhase`], and the [`FormMode`] that decides whether the
//! grid accepts gestures.
//!
//! # Threading
//! Stores are `Rc`-based and single-threaded. Mutations are synchronous;
//! subscribers run before the mutating call returns.

pub mod drag_drop;
pub mod form;
pub mod reactive;
pub mod undo;

pub use drag_drop::{DragDropPhase, DragDropState};
pub use form::{FormMode, FormState, calendar_selection_enabled};
pub use reactive::{Derived, Observable, Subscription};
pub use undo::{HistoryAction, HistoryCursor, UndoConfig, UndoHistory, Undoable, UndoableParts};

use slotgrid_core::GridConfig;

/// Undo configuration implied by a [`GridConfig`].
#[must_use]
pub fn undo_config(config: &GridConfig) -> UndoConfig {
    match config.undo_max_depth {
        Some(depth) => UndoConfig::with_max_depth(depth),
        None => UndoConfig::unlimited(),
    }
}
