/// Optional file mirror for console output
use super::config::get_logger_config;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Open the configured log file in append mode. No-op when no path is set.
pub fn init_file_logging() {
    let Some(path) = get_logger_config().file_path else {
        return;
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => *LOG_FILE.lock() = Some(file),
        Err(e) => eprintln!("Failed to open log file '{}': {}", path.display(), e),
    }
}

pub fn write_to_file(line: &str) {
    let mut guard = LOG_FILE.lock();
    if let Some(file) = guard.as_mut() {
        let _ = writeln!(file, "{}", line);
    }
}

pub fn flush_file_logging() {
    if let Some(file) = LOG_FILE.lock().as_mut() {
        let _ = file.flush();
    }
}
