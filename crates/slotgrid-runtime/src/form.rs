#![forbid(unsafe_code)]

//! Which form the attendee has open, and whether the grid accepts edits.

use crate::reactive::{Derived, Observable, Subscription};

/// The form currently shown next to the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum FormMode {
    /// Read-only view of everyone's availability.
    #[default]
    Viewing,
    /// A new attendee is entering availability.
    Joining,
    /// An existing attendee is changing availability.
    Editing,
}

impl FormMode {
    /// Whether the calendar grid should accept selection gestures.
    #[must_use]
    pub const fn allows_selection(self) -> bool {
        matches!(self, Self::Joining | Self::Editing)
    }
}

/// Shared handle to the current [`FormMode`].
#[derive(Debug, Clone)]
pub struct FormState {
    mode: Observable<FormMode>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(FormMode::default())
    }
}

impl FormState {
    #[must_use]
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode: Observable::new(mode),
        }
    }

    #[must_use]
    pub fn get(&self) -> FormMode {
        self.mode.get()
    }

    pub fn set(&self, mode: FormMode) -> bool {
        self.mode.set(mode)
    }

    pub fn subscribe(&self, callback: impl Fn(&FormMode) + 'static) -> Subscription {
        self.mode.subscribe(callback)
    }
}

/// True while the attendee is joining or editing.
#[must_use]
pub fn calendar_selection_enabled(form: &FormState) -> Derived<bool> {
    Derived::new(&form.mode, |mode: &FormMode| mode.allows_selection())
}
