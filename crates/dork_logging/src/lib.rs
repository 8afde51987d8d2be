#![deny(missing_docs)]
//! Logging facade for the dork parser crates.
//!
//! Library code logs through the `dork_*` macros, which forward to the `log`
//! crate. Binaries pick a backend with [`initialize`]; tests call
//! [`initialize_for_tests`].

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[doc(hidden)]
pub use log as __log;

/// File written by [`LogDestination::File`] and [`LogDestination::Both`].
pub const LOG_FILE_NAME: &str = "dork_parser.log";

/// Logs at trace level.
#[macro_export]
macro_rules! dork_trace {
    ($($arg:tt)*) => {
        $crate::__log::trace!($($arg)*)
    };
}

/// Logs at debug level.
#[macro_export]
macro_rules! dork_debug {
    ($($arg:tt)*) => {
        $crate::__log::debug!($($arg)*)
    };
}

/// Logs at info level.
#[macro_export]
macro_rules! dork_info {
    ($($arg:tt)*) => {
        $crate::__log::info!($($arg)*)
    };
}

/// Logs at warn level.
#[macro_export]
macro_rules! dork_warn {
    ($($arg:tt)*) => {
        $crate::__log::warn!($($arg)*)
    };
}

/// Logs at error level.
#[macro_export]
macro_rules! dork_error {
    ($($arg:tt)*) => {
        $crate::__log::error!($($arg)*)
    };
}

/// Where [`initialize`] sends log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// [`LOG_FILE_NAME`] in the working directory.
    File,
    /// Standard output and standard error.
    Terminal,
    /// Both of the above.
    Both,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

/// Installs the global logger for a binary. Only the first call has effect.
///
/// If the log file cannot be created a warning goes to stderr and the
/// remaining destinations are still installed.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match File::create(LOG_FILE_NAME) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("Warning: cannot create {LOG_FILE_NAME}: {err}"),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

/// Terminal logger for tests; a no-op when a logger is already installed.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
