#![forbid(unsafe_code)]

//! Undo/redo for reactive values.
//!
//! - [`history`]: the append-only log with a cursor ([`UndoHistory`]).
//! - [`undoable`]: the subscribable store built on it ([`Undoable`]).
//!
//! History is linear. Writing after an undo discards everything that could
//! have been redone; there is no branching.

pub mod history;
pub mod undoable;

pub use history::{HistoryCursor, UndoConfig, UndoHistory};
pub use undoable::{HistoryAction, Undoable, UndoableParts};
