//! Logging macros gated by a module-level `ENABLE_LOGS` flag.
//!
//! A module opts in by defining the flag and importing the macros from the
//! crate root:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_info, log_warn};
//!
//! log_info!("ticker started");
//! ```
//! Setting the flag to `false` silences the module without touching the
//! global `RUST_LOG` filter; the message arguments are not evaluated then.

/// Session lifecycle and cadence events: toggles, resets, break suggestions.
///
/// The calling module must define:
/// ```ignore
/// const ENABLE_LOGS: bool = true;
/// ```
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Posture alerts. Same `ENABLE_LOGS` requirement as [`log_info!`].
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Failures that are logged instead of propagated, such as a report export
/// at shutdown. Same `ENABLE_LOGS` requirement as [`log_info!`].
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    const ENABLE_LOGS: bool = false;

    #[test]
    fn disabled_flag_skips_argument_evaluation() {
        let mut evaluated = 0;
        crate::log_info!("{}", {
            evaluated += 1;
            evaluated
        });
        crate::log_warn!("{}", {
            evaluated += 1;
            evaluated
        });
        crate::log_error!("{}", {
            evaluated += 1;
            evaluated
        });
        assert_eq!(evaluated, 0);
    }
}
