#![forbid(unsafe_code)]

//! Shared value cell behind every slotgrid store.
//!
//! An [`Observable`] is a cheap handle to one `Rc<RefCell<..>>` cell. Writes
//! that change the value (by `PartialEq`) bump a version counter and call
//! the live listeners in the order they subscribed. Listeners are held
//! weakly: the [`Subscription`] guard owns them, and entries whose guard is
//! gone are dropped the next time the value changes.
//!
//! Listeners run with the cell unborrowed, so a listener may write to the
//! store it listens to. That write notifies in full before the outer round
//! continues, and the outer round keeps handing out the value it started with.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, debug_span};
use web_time::Instant;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Shared<T> {
    value: T,
    version: u64,
    listeners: Vec<Weak<dyn Fn(&T)>>,
}

/// Handle to a shared value with change notification.
///
/// Clones point at the same cell.
pub struct Observable<T> {
    cell: Rc<RefCell<Shared<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cell = self.cell.borrow();
        f.debug_struct("Observable")
            .field("value", &cell.value)
            .field("version", &cell.version)
            .field("listeners", &cell.listeners.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Shared {
                value,
                version: 0,
                listeners: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.cell.borrow().value.clone()
    }

    /// Read the value in place.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.borrow().value)
    }

    /// Store `value`. Returns `false`, without notifying, when it equals the
    /// current value.
    pub fn set(&self, value: T) -> bool {
        {
            let mut cell = self.cell.borrow_mut();
            if cell.value == value {
                return false;
            }
            cell.value = value;
            cell.version += 1;
        }
        self.notify();
        true
    }

    /// Call `listener` with every later value. Dropping the guard stops it.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let listener: Listener<T> = Rc::new(listener);
        self.cell.borrow_mut().listeners.push(Rc::downgrade(&listener));
        Subscription {
            _listener: Box::new(listener),
        }
    }

    /// Count of value-changing writes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.cell.borrow().version
    }

    /// Registered listeners, including released ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.cell.borrow().listeners.len()
    }

    fn notify(&self) {
        let (live, value, version) = {
            let mut cell = self.cell.borrow_mut();
            let mut live: Vec<Listener<T>> = Vec::with_capacity(cell.listeners.len());
            cell.listeners.retain(|weak| match weak.upgrade() {
                Some(listener) => {
                    live.push(listener);
                    true
                }
                None => false,
            });
            (live, cell.value.clone(), cell.version)
        };
        if live.is_empty() {
            return;
        }

        let subscribers = live.len() as u64;
        let started = Instant::now();
        let _span = debug_span!("slotgrid.notify", version, subscribers).entered();
        for listener in &live {
            listener(&value);
        }
        debug!(
            subscribers,
            elapsed_us = started.elapsed().as_micros() as u64,
            "store change delivered"
        );
    }
}

/// Keeps one listener registered; dropping it releases the listener.
pub struct Subscription {
    _listener: Box<dyn Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
