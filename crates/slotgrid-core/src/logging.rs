#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature this re-exports the `tracing` macros. Without
//! it, macros of the same names are exported at the crate root and expand to
//! nothing, so call sites import from one place or the other and stay free
//! of per-line `cfg` attributes.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, info_span, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    #[macro_export]
    #[doc(hidden)]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}
