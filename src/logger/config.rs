/// Logger configuration and command-line flag parsing
///
/// Flags recognised:
/// - `--debug-<tag>` enables debug output for one tag
/// - `--debug-all` enables debug output for every tag
/// - `--verbose` / `--verbose-<tag>` enable verbose output
/// - `--quiet` lowers the threshold to errors only
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Messages above this level are dropped
    pub min_level: LogLevel,
    /// Tags with debug output enabled (debug keys)
    pub debug_tags: HashSet<String>,
    /// Tags with verbose output enabled (debug keys)
    pub verbose_tags: HashSet<String>,
    pub debug_all: bool,
    /// If non-empty, only these tags are shown at info/warning level
    pub enabled_tags: HashSet<String>,
    /// Optional file that mirrors console output
    pub file_path: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            debug_all: false,
            enabled_tags: HashSet::new(),
            file_path: None,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

pub fn update_logger_config<F>(f: F)
where
    F: FnOnce(&mut LoggerConfig),
{
    let mut config = LOGGER_CONFIG.write();
    f(&mut config);
}

/// Initialize the global logger configuration from process arguments
pub fn init_from_args() {
    let args: Vec<String> = std::env::args().collect();
    let parsed = parse_args(&args);
    update_logger_config(|cfg| {
        let file_path = cfg.file_path.take();
        *cfg = parsed;
        cfg.file_path = file_path;
    });
}

/// Build a logger configuration from an argument list
pub fn parse_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for arg in args {
        if arg == "--debug-all" {
            config.debug_all = true;
            config.min_level = config.min_level.max(LogLevel::Debug);
        } else if let Some(tag) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(tag.to_lowercase());
            config.min_level = config.min_level.max(LogLevel::Debug);
        } else if arg == "--verbose" {
            config.min_level = LogLevel::Verbose;
        } else if let Some(tag) = arg.strip_prefix("--verbose-") {
            config.verbose_tags.insert(tag.to_lowercase());
            config.min_level = config.min_level.max(LogLevel::Debug);
        } else if arg == "--quiet" {
            config.min_level = LogLevel::Error;
        }
    }

    config
}

pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = LOGGER_CONFIG.read();
    config.debug_all
        || config.min_level == LogLevel::Verbose
        || config.debug_tags.contains(&tag.to_debug_key())
}

pub fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    LOGGER_CONFIG.read().verbose_tags.contains(&tag.to_debug_key())
}
