macro_rules! fatal {
    ($fmt:expr) => {
        (panic!(concat!("[FATAL] ", $fmt)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        (panic!(concat!("[FATAL] ", $fmt), $($arg)*))
    };
}

macro_rules! trace {
    ($fmt:expr) => {
        #[cfg(debug_assertions)]
        tracing::trace!($fmt)
    };
    ($fmt:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        tracing::trace!($fmt, $($arg)*)
    }
}

/// Reports a violated caller precondition.
///
/// Panics in debug builds. Release builds log a warning and carry on,
/// so the caller must clamp the offending value itself.
macro_rules! precondition_failed {
    ($fmt:expr) => {
        if cfg!(debug_assertions) {
            fatal!($fmt)
        } else {
            tracing::warn!(concat!("precondition violated: ", $fmt))
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        if cfg!(debug_assertions) {
            fatal!($fmt, $($arg)*)
        } else {
            tracing::warn!(concat!("precondition violated: ", $fmt), $($arg)*)
        }
    };
}
