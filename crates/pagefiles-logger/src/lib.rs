use colored::Colorize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Debug channel for page-file glob discovery
pub const GLOB_NAMESPACE: &str = "vps:glob";

/// Environment variable selecting which debug channels print
pub const DEBUG_ENV_VAR: &str = "DEBUG";

static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
static VERBOSITY: Mutex<u8> = Mutex::new(0);
static DEBUG_FILTER: Mutex<Option<DebugFilter>> = Mutex::new(None);

/// Get the current verbosity level
pub fn get_verbosity() -> u8 {
    VERBOSITY.lock().ok().map(|v| *v).unwrap_or(0)
}

/// Initialize the logger with a verbosity level and an optional log file.
///
/// The log file is truncated so each build session starts fresh.
pub fn init_with_verbosity(verbosity: u8, log_file: Option<PathBuf>) -> Result<(), String> {
    if let Ok(mut v) = VERBOSITY.lock() {
        *v = verbosity;
    }

    let Some(log_file) = log_file else {
        return Ok(());
    };

    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create log directory: {}", e))?;
    }
    if log_file.exists() {
        let _ = fs::remove_file(&log_file);
    }

    let mut log_file_guard = LOG_FILE
        .lock()
        .map_err(|_| "Log file lock poisoned".to_string())?;
    *log_file_guard = Some(log_file);

    Ok(())
}

/// Get the log file path, if one was configured
pub fn get_log_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}

/// Write to log file
fn write_to_log(message: &str) {
    write_to_log_with_source(message, "vps")
}

/// Write to log file with custom source tag
fn write_to_log_with_source(message: &str, source: &str) {
    if let Ok(log_file_guard) = LOG_FILE.lock() {
        if let Some(ref log_path) = *log_file_guard {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_path) {
                let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "[{}] [{}] {}", timestamp, source, message);
            }
        }
    }
}

/// Session-level progress (console at verbosity >= 1, always to file)
pub fn info(message: &str) {
    write_to_log(&format!("INFO {}", message));
    if get_verbosity() >= 1 {
        eprintln!("{} {}", "[vite-plugin-ssr]".cyan(), message);
    }
}

/// Per-request detail (console at verbosity >= 2, always to file)
pub fn debug(message: &str) {
    write_to_log(&format!("DEBUG {}", message));
    if get_verbosity() >= 2 {
        eprintln!("{} {}", "[vite-plugin-ssr]".dimmed(), message);
    }
}

/// Failures reported back to the host; always printed
pub fn error(message: &str) {
    write_to_log(&format!("ERROR {}", message));
    eprintln!("{} {}", "[vite-plugin-ssr]".red().bold(), message);
}

// =============================================================================
// NAMESPACED DEBUG CHANNELS
// =============================================================================

/// Parsed `DEBUG` selector, e.g. `vps:*,-vps:routing`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugFilter {
    enabled: Vec<String>,
    skipped: Vec<String>,
}

impl DebugFilter {
    /// Parse a comma- or whitespace-separated list of namespaces.
    /// A trailing `*` matches any suffix; a leading `-` excludes.
    pub fn parse(selector: &str) -> Self {
        let mut filter = DebugFilter::default();
        for item in selector
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|item| !item.is_empty())
        {
            match item.strip_prefix('-') {
                Some(skipped) => filter.skipped.push(skipped.to_string()),
                None => filter.enabled.push(item.to_string()),
            }
        }
        filter
    }

    pub fn is_enabled(&self, namespace: &str) -> bool {
        let matches = |pattern: &String| match pattern.strip_suffix('*') {
            Some(prefix) => namespace.starts_with(prefix),
            None => pattern == namespace,
        };
        !self.skipped.iter().any(matches) && self.enabled.iter().any(matches)
    }
}

/// Replace the active debug selector (the default is read from `DEBUG`)
pub fn set_debug_filter(selector: &str) {
    if let Ok(mut guard) = DEBUG_FILTER.lock() {
        *guard = Some(DebugFilter::parse(selector));
    }
}

/// Whether messages on `namespace` are printed
pub fn is_debug_enabled(namespace: &str) -> bool {
    let Ok(mut guard) = DEBUG_FILTER.lock() else {
        return false;
    };
    guard
        .get_or_insert_with(|| {
            DebugFilter::parse(&std::env::var(DEBUG_ENV_VAR).unwrap_or_default())
        })
        .is_enabled(namespace)
}

/// Log a message on a debug channel (to console if the channel is enabled, always to file)
pub fn debug_ns(namespace: &str, message: &str) {
    write_to_log_with_source(message, namespace);
    if is_debug_enabled(namespace) {
        eprintln!("{} {}", namespace.magenta().bold(), message);
    }
}

/// Log a message on the glob discovery channel
pub fn debug_glob(message: &str) {
    debug_ns(GLOB_NAMESPACE, message);
}
