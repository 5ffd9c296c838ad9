#![forbid(unsafe_code)]

//! Reactive primitives: shared observable values and derived views.
//!
//! Single-threaded by construction (`Rc<RefCell<..>>`). Callers that share
//! a store across logical owners serialize access themselves.

pub mod derived;
pub mod observable;

pub use derived::Derived;
pub use observable::{Observable, Subscription};
