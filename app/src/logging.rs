//! FILENAME: app/src/logging.rs
// PURPOSE: Unified logging system for the application.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;

// ============================================================================
// UNIFIED LOGGING SYSTEM
// ============================================================================

/// Global sequence counter shared by every log line
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Global log file handle
pub static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Initialize the unified log file (truncates an existing one)
pub fn init_log_file(path: &Path) -> Result<PathBuf, String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create log dir at {:?}: {}", parent, e))?;
        }
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| format!("Failed to create log file {:?}: {}", path, e))?;

    let mut log_file = LOG_FILE.lock().map_err(|e| format!("Lock error: {}", e))?;
    *log_file = Some(file);

    Ok(path.to_path_buf())
}

/// Format a log line in unified format
pub fn format_line(seq: u64, level: &str, category: &str, message: &str) -> String {
    format!("{}|{}|{}|{}", seq, level, category, message)
}

/// Write a log line in unified format.
/// Lines go to stderr so stdout stays clean for rendered output.
pub fn write_log(level: &str, category: &str, message: &str) {
    let line = format_line(next_seq(), level, category, message);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            if let Err(e) = writeln!(file, "{}", line) {
                eprintln!("[LOG_ERROR] Failed to write: {}", e);
            }
            let _ = file.flush();
        }
    }

    eprintln!("{}", line);
}

/// Single-letter level tag used in the unified format
pub fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "E",
        Level::Warn => "W",
        Level::Info => "I",
        Level::Debug => "D",
        Level::Trace => "T",
    }
}

/// Category for a `log` record: last path segment of its target, uppercased.
/// `persistence::store` becomes `STORE`, `insight_engine` becomes `INSIGHT_ENGINE`.
pub fn category_for_target(target: &str) -> String {
    target.rsplit("::").next().unwrap_or(target).to_uppercase()
}

// ============================================================================
// `log` FACADE BACKEND
// ============================================================================

/// Routes records from the library crates (which use the `log` facade)
/// into the unified format.
struct UnifiedLogger;

static LOGGER: UnifiedLogger = UnifiedLogger;

impl Log for UnifiedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            write_log(
                level_tag(record.level()),
                &category_for_target(record.target()),
                &record.args().to_string(),
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
    }
}

/// Parses a level name ("error", "warn", "info", "debug", "trace", "off").
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.parse().ok()
}

/// Installs the unified logger. Safe to call more than once: later calls
/// only adjust the level and the log file.
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<(), String> {
    // Already installed is fine: the existing logger is this one.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);

    if let Some(path) = log_file {
        let path = init_log_file(path)?;
        crate::log_info!("SYS", "log file initialized at {:?}", path);
    }

    Ok(())
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        if log::max_level() >= log::LevelFilter::Debug {
            $crate::logging::write_log("D", $cat, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        if log::max_level() >= log::LevelFilter::Info {
            $crate::logging::write_log("I", $cat, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        if log::max_level() >= log::LevelFilter::Warn {
            $crate::logging::write_log("W", $cat, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        if log::max_level() >= log::LevelFilter::Error {
            $crate::logging::write_log("E", $cat, &format!($($arg)*))
        }
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_info;`
pub use log_debug;
pub use log_error;
pub use log_info;
pub use log_warn;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(7, "I", "LOAD", "ok"), "7|I|LOAD|ok");
    }

    #[test]
    fn test_category_for_target() {
        assert_eq!(category_for_target("persistence::store"), "STORE");
        assert_eq!(category_for_target("insight_engine"), "INSIGHT_ENGINE");
    }

    #[test]
    fn test_sequence_increases() {
        let a = next_seq();
        let b = next_seq();
        assert!(b > a);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("OFF"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_level_tag() {
        assert_eq!(level_tag(Level::Warn), "W");
        assert_eq!(level_tag(Level::Debug), "D");
    }
}
