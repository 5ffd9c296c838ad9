#![forbid(unsafe_code)]

//! Linear undo history: an append-only log with a cursor.
//!
//! # Architecture
//!
//! ```text
//! record(a), record(b), record(c)
//! ┌──────────────────────────────────┐
//! │ stack:  [s0, a, b, c]            │
//! │ index:               ^ 3         │
//! └──────────────────────────────────┘
//!
//! step_back() x2
//! ┌──────────────────────────────────┐
//! │ stack:  [s0, a, b, c]            │
//! │ index:       ^ 1                 │
//! └──────────────────────────────────┘
//!
//! record(d): the redo tail is truncated before appending
//! ┌──────────────────────────────────┐
//! │ stack:  [s0, a, d]               │
//! │ index:          ^ 2              │
//! └──────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. The stack is never empty and `index < stack.len()`.
//! 2. The current value is always `stack[index]`.
//! 3. `record(v)` with `v == current` leaves the history untouched, so two
//!    adjacent entries are never equal.
//! 4. With a depth limit, `stack.len() <= max_depth` after every operation.

/// Configuration for an [`UndoHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UndoConfig {
    /// Maximum number of retained entries, including the current one.
    /// Oldest entries are evicted when exceeded. `None` is unbounded.
    pub max_depth: Option<usize>,
}

impl UndoConfig {
    /// Bounded history. A depth of zero is treated as one.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth.max(1)),
        }
    }

    /// Unbounded history.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self { max_depth: None }
    }
}

/// Position of the cursor within the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCursor {
    pub index: usize,
    pub len: usize,
}

impl HistoryCursor {
    /// Whether a step back would move the cursor.
    #[must_use]
    pub const fn can_undo(self) -> bool {
        self.index > 0
    }

    /// Whether a step forward would move the cursor.
    #[must_use]
    pub const fn can_redo(self) -> bool {
        self.index + 1 < self.len
    }
}

/// Append-only value log with an index cursor.
#[derive(Debug, Clone)]
pub struct UndoHistory<T> {
    stack: Vec<T>,
    index: usize,
    config: UndoConfig,
}

impl<T> UndoHistory<T> {
    /// History holding only `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_config(initial, UndoConfig::default())
    }

    #[must_use]
    pub fn with_config(initial: T, config: UndoConfig) -> Self {
        Self {
            stack: vec![initial],
            index: 0,
            config,
        }
    }

    /// The value under the cursor.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.stack[self.index]
    }

    #[must_use]
    pub fn cursor(&self) -> HistoryCursor {
        HistoryCursor {
            index: self.index,
            len: self.stack.len(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Always false: a history holds at least its initial value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    #[must_use]
    pub const fn config(&self) -> UndoConfig {
        self.config
    }

    /// Move the cursor one entry back. Returns whether it moved.
    pub fn step_back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Move the cursor one entry forward. Returns whether it moved.
    pub fn step_forward(&mut self) -> bool {
        if self.index + 1 >= self.stack.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

impl<T: PartialEq> UndoHistory<T> {
    /// Record `value` as the new current entry.
    ///
    /// Returns `false` (and changes nothing) when `value` equals the current
    /// entry. Otherwise any redo entries are discarded first.
    pub fn record(&mut self, value: T) -> bool {
        if *self.current() == value {
            return false;
        }
        self.stack.truncate(self.index + 1);
        self.stack.push(value);
        self.index += 1;
        self.enforce_depth();
        true
    }

    fn enforce_depth(&mut self) {
        let Some(max_depth) = self.config.max_depth else {
            return;
        };
        let max_depth = max_depth.max(1);
        if self.stack.len() > max_depth {
            let excess = self.stack.len() - max_depth;
            self.stack.drain(..excess);
            self.index = self.index.saturating_sub(excess);
        }
    }
}
