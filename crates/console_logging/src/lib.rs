#![deny(missing_docs)]
//! Log macros for the handover console crates.
//!
//! The macros forward to the `log` facade, so the binary decides where
//! records end up. Requests against the job API carry their own target.

/// Target of every job API request record, filterable on its own.
pub const API_TARGET: &str = "handover_api";

/// Trace-level record.
#[macro_export]
macro_rules! console_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Info-level record: commands run, exports written, config loaded.
#[macro_export]
macro_rules! console_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Debug-level record.
#[macro_export]
macro_rules! console_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Warning: a request or export failed but the console carries on.
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Error that ends the current command.
#[macro_export]
macro_rules! console_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// One HTTP exchange with the job API, logged at debug under [`API_TARGET`].
#[macro_export]
macro_rules! console_api {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::API_TARGET, $($arg)*);
    }};
}

/// Sends records to the terminal while tests run.
///
/// Safe to call from every test; only the first call installs a logger.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let _ = CombinedLogger::init(vec![TermLogger::new(
        log::LevelFilter::Debug,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    )]);
}
