use std::env;
use std::path::PathBuf;

use super::types::Config;

pub(super) fn apply_env(config: &mut Config) {
    apply_vars(config, |name| env::var(name).ok());
}

/// Apply `FOCUS_*` variables using `lookup` to read them.
/// Values that do not parse are ignored.
pub(super) fn apply_vars<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("FOCUS_STATE_FILE") {
        config.state_file = PathBuf::from(val);
    }
    if let Some(val) = lookup("FOCUS_LOG_FILE") {
        config.log_file = PathBuf::from(val);
    }
    if let Some(val) = lookup("FOCUS_LOG_LEVEL") {
        config.log_level = val;
    }
    if let Some(val) = lookup("FOCUS_LOG_MAX_LINES") {
        if let Ok(n) = val.parse() {
            config.log_max_lines = n;
        }
    }
    if let Some(val) = lookup("FOCUS_CHECK_INTERVAL") {
        if let Ok(n) = val.parse() {
            config.check_interval_secs = n;
        }
    }
    if let Some(val) = lookup("FOCUS_FOCUS_MODE") {
        config.focus_mode = val == "true" || val == "1";
    }
}
