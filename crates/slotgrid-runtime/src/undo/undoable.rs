#![forbid(unsafe_code)]

//! Subscribable value with linear undo/redo.
//!
//! [`Undoable<T>`] pairs an [`UndoHistory`] with an [`Observable`] view of
//! its current entry. Writes go through [`update`](Undoable::update) or
//! [`set`](Undoable::set); a write equal (by `PartialEq`) to the current
//! value is dropped without a history entry or notification.
//!
//! `can_undo` / `can_redo` are [`Derived`] flags over the history cursor, so
//! subscribers hear about them only when they flip.
//!
//! Handles are cheap to clone and share one history. Everything runs on the
//! caller's thread; nothing here locks.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use super::history::{HistoryCursor, UndoConfig, UndoHistory};
use crate::reactive::{Derived, Observable, Subscription};

/// A history-navigation callback, as handed out by [`Undoable::into_parts`].
pub type HistoryAction = Box<dyn Fn() -> bool>;

/// A value store with undo/redo history.
pub struct Undoable<T> {
    history: Rc<RefCell<UndoHistory<T>>>,
    value: Observable<T>,
    cursor: Observable<HistoryCursor>,
}

impl<T> Clone for Undoable<T> {
    fn clone(&self) -> Self {
        Self {
            history: Rc::clone(&self.history),
            value: self.value.clone(),
            cursor: self.cursor.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Undoable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let history = self.history.borrow();
        f.debug_struct("Undoable")
            .field("current", history.current())
            .field("cursor", &history.cursor())
            .finish()
    }
}

/// The pieces of an [`Undoable`], split for consumers that want them apart.
pub struct UndoableParts<T> {
    pub store: Undoable<T>,
    pub undo: HistoryAction,
    pub redo: HistoryAction,
    pub can_undo: Derived<bool>,
    pub can_redo: Derived<bool>,
}

impl<T: Clone + PartialEq + 'static> Undoable<T> {
    /// Unbounded history starting at `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_config(initial, UndoConfig::default())
    }

    #[must_use]
    pub fn with_config(initial: T, config: UndoConfig) -> Self {
        let history = UndoHistory::with_config(initial.clone(), config);
        let cursor = history.cursor();
        Self {
            history: Rc::new(RefCell::new(history)),
            value: Observable::new(initial),
            cursor: Observable::new(cursor),
        }
    }

    /// Split into store, undo/redo callbacks and the two derived flags.
    #[must_use]
    pub fn into_parts(self) -> UndoableParts<T> {
        let undo_handle = self.clone();
        let redo_handle = self.clone();
        UndoableParts {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo: Box::new(move || undo_handle.undo()),
            redo: Box::new(move || redo_handle.redo()),
            store: self,
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Borrow the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.value.with(f)
    }

    /// Subscribe to value changes (including those caused by undo/redo).
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.value.subscribe(callback)
    }

    /// Replace the value with `f(current)`.
    ///
    /// Returns `false` when the result equals the current value; no history
    /// entry is created and nobody is notified. Otherwise the redo tail is
    /// discarded, the result appended, and subscribers notified.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        // `f` runs without any borrow held so it may read this store.
        let current = self.history.borrow().current().clone();
        let next = f(&current);
        let recorded = self.history.borrow_mut().record(next);
        if recorded {
            let cursor = self.history.borrow().cursor();
            debug!(index = cursor.index, len = cursor.len, "undo history recorded");
            self.publish();
        }
        recorded
    }

    /// Equivalent to `update(|_| value)`.
    pub fn set(&self, value: T) -> bool {
        self.update(move |_| value)
    }

    /// Step back one entry. No-op (returns `false`) at the oldest entry.
    pub fn undo(&self) -> bool {
        let moved = self.history.borrow_mut().step_back();
        if moved {
            debug!(index = self.history.borrow().cursor().index, "undo");
            self.publish();
        }
        moved
    }

    /// Step forward one entry. No-op (returns `false`) at the newest entry.
    pub fn redo(&self) -> bool {
        let moved = self.history.borrow_mut().step_forward();
        if moved {
            debug!(index = self.history.borrow().cursor().index, "redo");
            self.publish();
        }
        moved
    }

    /// Reactive flag: would [`undo`](Self::undo) have an effect?
    #[must_use]
    pub fn can_undo(&self) -> Derived<bool> {
        Derived::new(&self.cursor, |cursor: &HistoryCursor| cursor.can_undo())
    }

    /// Reactive flag: would [`redo`](Self::redo) have an effect?
    #[must_use]
    pub fn can_redo(&self) -> Derived<bool> {
        Derived::new(&self.cursor, |cursor: &HistoryCursor| cursor.can_redo())
    }

    /// Cursor position and history length.
    #[must_use]
    pub fn cursor(&self) -> HistoryCursor {
        self.history.borrow().cursor()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.borrow().len()
    }

    /// Push the history state out to the observables. Flags first, so value
    /// subscribers observe consistent `can_undo` / `can_redo`.
    fn publish(&self) {
        let (current, cursor) = {
            let history = self.history.borrow();
            (history.current().clone(), history.cursor())
        };
        self.cursor.set(cursor);
        self.value.set(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn first_change_enables_undo() {
        let store = Undoable::new(0);
        let can_undo = store.can_undo();
        assert!(!can_undo.get());
        store.set(1);
        assert!(can_undo.get());
        assert!(!store.can_redo().get());
    }

    #[test]
    fn update_applies_function_to_current() {
        let store = Undoable::new(vec![1]);
        store.update(|v| {
            let mut next = v.clone();
            next.push(2);
            next
        });
        assert_eq!(store.get(), vec![1, 2]);
        assert_eq!(store.history_len(), 2);
    }

    #[test]
    fn equal_write_creates_no_entry_and_no_notification() {
        let store = Undoable::new(String::from("a"));
        let fired = Rc::new(Cell::new(0));
        let fired_clone = Rc::clone(&fired);
        let _sub = store.subscribe(move |_| fired_clone.set(fired_clone.get() + 1));

        assert!(!store.set(String::from("a")));
        assert!(!store.update(Clone::clone));
        assert_eq!(store.history_len(), 1);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn set_undo_redo_round_trip() {
        let store = Undoable::new(0);
        store.set(7);
        assert!(store.undo());
        assert_eq!(store.get(), 0);
        assert!(store.redo());
        assert_eq!(store.get(), 7);
    }

    #[test]
    fn new_write_after_undo_discards_redo() {
        let store = Undoable::new("init");
        store.set("a");
        store.set("b");
        store.undo();
        store.set("c");
        assert!(!store.redo());
        assert_eq!(store.get(), "c");
        store.undo();
        assert_eq!(store.get(), "a");
    }

    #[test]
    fn out_of_bounds_navigation_is_noop() {
        let store = Undoable::new(1);
        assert!(!store.undo());
        assert!(!store.redo());
        assert_eq!(store.get(), 1);
    }

    #[test]
    fn undo_notifies_subscribers_with_restored_value() {
        let store = Undoable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let _sub = store.subscribe(move |v| seen_clone.borrow_mut().push(*v));
        store.set(1);
        store.set(2);
        store.undo();
        store.redo();
        assert_eq!(*seen.borrow(), vec![1, 2, 1, 2]);
    }

    #[test]
    fn flags_are_consistent_inside_value_callbacks() {
        let store = Undoable::new(0);
        let peek = store.clone();
        let observed = Rc::new(RefCell::new(Vec::new()));
        let observed_clone = Rc::clone(&observed);
        let _sub = store.subscribe(move |v| {
            let cursor = peek.cursor();
            observed_clone
                .borrow_mut()
                .push((*v, cursor.can_undo(), cursor.can_redo()));
        });
        store.set(1);
        store.undo();
        assert_eq!(*observed.borrow(), vec![(1, true, false), (0, false, true)]);
    }

    #[test]
    fn update_may_read_the_store() {
        let store = Undoable::new(3);
        let reader = store.clone();
        store.update(|v| v + reader.get());
        assert_eq!(store.get(), 6);
    }

    #[test]
    fn parts_share_one_history() {
        let parts = Undoable::new(0).into_parts();
        parts.store.set(5);
        assert!(parts.can_undo.get());
        assert!((parts.undo)());
        assert_eq!(parts.store.get(), 0);
        assert!(parts.can_redo.get());
        assert!((parts.redo)());
        assert_eq!(parts.store.get(), 5);
        assert!(!(parts.redo)());
    }

    #[test]
    fn bounded_history_limits_undo_depth() {
        let store = Undoable::with_config(0, UndoConfig::with_max_depth(2));
        store.set(1);
        store.set(2);
        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(store.get(), 1);
    }

    #[test]
    fn debug_shows_current_and_cursor() {
        let store = Undoable::new(3_u8);
        store.set(4);
        let text = format!("{store:?}");
        assert!(text.starts_with("Undoable"));
        assert!(text.contains("current: 4"));
        assert!(text.contains("index: 1"));
    }

    #[test]
    fn subscriber_may_normalize_during_undo() {
        let store: Undoable<Vec<u32>> = Undoable::new(Vec::new());
        let writer = store.clone();
        let _sorter = store.subscribe(move |v| {
            if !v.is_sorted() {
                let mut sorted = v.clone();
                sorted.sort_unstable();
                writer.set(sorted);
            }
        });

        store.set(vec![3, 1]);
        assert_eq!(store.get(), vec![1, 3]);
        assert_eq!(store.history_len(), 3);

        // Stepping back lands on the unsorted entry, which the subscriber
        // immediately replaces, dropping the redo tail.
        assert!(store.undo());
        assert_eq!(store.get(), vec![1, 3]);
        assert_eq!(store.cursor(), HistoryCursor { index: 2, len: 3 });
        assert!(!store.can_redo().get());
    }
}
