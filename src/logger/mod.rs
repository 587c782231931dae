//! Structured, tag-based logging
//!
//! ```rust,ignore
//! use pump_trader::logger::{self, LogTag};
//!
//! logger::info(LogTag::Swap, "Buy submitted");
//! logger::debug(LogTag::PoolDiscovery, "Candidate decoded"); // only with --debug-pool-discovery
//! ```
//!
//! Call `logger::init()` once at startup. It reads `--debug-<tag>`,
//! `--verbose` and `--quiet` from the process arguments and opens the
//! log file when one is configured.

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{
    get_logger_config, init_from_args, parse_args, set_logger_config, update_logger_config,
    LoggerConfig,
};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger from command-line arguments and open the log file
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Set the log file path, then (re)open it
pub fn set_log_file(path: Option<std::path::PathBuf>) {
    update_logger_config(|cfg| cfg.file_path = path);
    file::init_file_logging();
}

/// Critical failures. Always shown.
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Only shown when `--debug-<tag>` was given for this tag
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Only shown with `--verbose`
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Flush pending file writes. Call during shutdown.
pub fn flush() {
    file::flush_file_logging();
}
