#![forbid(unsafe_code)]

//! Shared drag-drop phase.
//!
//! The interaction controller writes the phase when a move or resize starts
//! and resets it when the gesture ends; visual affordances such as the trash
//! drop zone subscribe to it.

use crate::reactive::{Derived, Observable, Subscription};

/// What the pointer is currently doing to an existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DragDropPhase {
    #[default]
    None,
    Moving,
    ResizingTop,
    ResizingBottom,
}

impl DragDropPhase {
    /// Whether a selection is being dragged in any way.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether the dragged selection is being resized.
    #[must_use]
    pub const fn is_resizing(self) -> bool {
        matches!(self, Self::ResizingTop | Self::ResizingBottom)
    }
}

/// Shared handle to the current [`DragDropPhase`].
#[derive(Debug, Clone)]
pub struct DragDropState {
    phase: Observable<DragDropPhase>,
}

impl Default for DragDropState {
    fn default() -> Self {
        Self::new()
    }
}

impl DragDropState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Observable::new(DragDropPhase::None),
        }
    }

    #[must_use]
    pub fn get(&self) -> DragDropPhase {
        self.phase.get()
    }

    /// Publish a new phase. Returns whether it changed.
    pub fn set(&self, phase: DragDropPhase) -> bool {
        self.phase.set(phase)
    }

    pub fn subscribe(&self, callback: impl Fn(&DragDropPhase) + 'static) -> Subscription {
        self.phase.subscribe(callback)
    }

    /// Reactive flag that is true while any drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> Derived<bool> {
        Derived::new(&self.phase, |phase: &DragDropPhase| phase.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let state = DragDropState::new();
        assert_eq!(state.get(), DragDropPhase::None);
        assert!(!state.is_dragging().get());
    }

    #[test]
    fn dragging_flag_follows_phase() {
        let state = DragDropState::default();
        let dragging = state.is_dragging();
        state.set(DragDropPhase::ResizingTop);
        assert!(dragging.get());
        assert!(state.get().is_resizing());
        state.set(DragDropPhase::None);
        assert!(!dragging.get());
    }

    #[test]
    fn clones_share_phase() {
        let writer = DragDropState::new();
        let reader = writer.clone();
        assert!(writer.set(DragDropPhase::Moving));
        assert!(!writer.set(DragDropPhase::Moving));
        assert_eq!(reader.get(), DragDropPhase::Moving);
        assert!(!reader.get().is_resizing());
    }
}
