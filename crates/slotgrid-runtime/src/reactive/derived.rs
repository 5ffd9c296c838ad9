#![forbid(unsafe_code)]

//! Read-only values computed from an [`Observable`].
//!
//! A [`Derived<U>`] owns a subscription to its source and recomputes on
//! every source change. Recomputed values equal to the previous one do not
//! notify, so a `Derived<bool>` only fires when the flag flips.

use super::observable::{Observable, Subscription};

/// A read-only view of `map(source)`, kept current by an owned subscription.
pub struct Derived<U> {
    value: Observable<U>,
    _source: Subscription,
}

impl<U: std::fmt::Debug> std::fmt::Debug for Derived<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Derived").field("value", &self.value).finish()
    }
}

impl<U: Clone + PartialEq + 'static> Derived<U> {
    /// Derive from `source` through the pure function `map`.
    pub fn new<T: Clone + PartialEq + 'static>(
        source: &Observable<T>,
        map: impl Fn(&T) -> U + 'static,
    ) -> Self {
        let value = Observable::new(source.with(&map));
        let target = value.clone();
        let subscription = source.subscribe(move |v| {
            target.set(map(v));
        });
        Self {
            value,
            _source: subscription,
        }
    }

    /// Current derived value.
    #[must_use]
    pub fn get(&self) -> U {
        self.value.get()
    }

    /// Subscribe to changes of the derived value.
    pub fn subscribe(&self, callback: impl Fn(&U) + 'static) -> Subscription {
        self.value.subscribe(callback)
    }

    /// Number of times the derived value has changed.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.value.version()
    }
}
