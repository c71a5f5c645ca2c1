//! File logging with rotation.
//!
//! The terminal belongs to the board, so `tracing` output goes to a log
//! file. The file is rotated when it exceeds a configurable line limit
//! before the subscriber is installed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::EnvFilter;

/// Default maximum number of lines before rotation.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Default filter when neither `FOCUS_LOG` nor the config sets one.
pub const DEFAULT_LEVEL: &str = "info";

/// Env var holding a full filter directive, e.g. `focus135=debug`.
pub const FILTER_ENV: &str = "FOCUS_LOG";

/// Install the global subscriber writing to `path`.
///
/// `FOCUS_LOG` wins over `level`. An invalid level falls back to
/// [`DEFAULT_LEVEL`].
pub fn init(path: &Path, level: &str, max_lines: usize) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
        }
    }

    rotate_if_needed(path, max_lines)
        .map_err(|e| format!("failed to rotate {}: {}", path.display(), e))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("failed to open {}: {}", path.display(), e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| format!("failed to install logger: {}", e))
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Rotate `path` if it has more than `max_lines` lines.
///
/// Returns the backup path when a rotation happened.
pub fn rotate_if_needed(path: &Path, max_lines: usize) -> io::Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    if count_lines(path)? <= max_lines {
        return Ok(None);
    }

    rotate_log(path).map(Some)
}

/// Count lines in a file.
pub fn count_lines(path: &Path) -> io::Result<usize> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(reader.lines().count())
}

/// Move the log aside as `<name>.<YYYYmmdd-HHMMSS>.bak` and recreate it empty.
pub fn rotate_log(path: &Path) -> io::Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let backup_name = format!(
        "{}.{}.bak",
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("focus.log"),
        timestamp
    );
    let backup_path = path.with_file_name(backup_name);

    fs::rename(path, &backup_path)?;
    File::create(path)?;

    Ok(backup_path)
}
