use std::path::{Path, PathBuf};

use super::cli::CliArgs;
use super::toml::FileConfig;
use super::{env, toml};
use crate::log::{DEFAULT_LEVEL, DEFAULT_MAX_LINES};
use crate::store::STORAGE_KEY;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "focus.toml";

/// Default day-check interval in seconds.
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;

/// Directory holding the state blob and log by default.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("focus135")
}

/// Focus configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the JSON state blob.
    pub state_file: PathBuf,
    /// Path to the log file.
    pub log_file: PathBuf,
    /// Log filter directive (e.g. `info`, `focus135=debug`).
    pub log_level: String,
    /// Lines kept in the log before it is rotated at startup.
    pub log_max_lines: usize,
    /// Seconds between day checks on the board.
    pub check_interval_secs: u64,
    /// Start the board with medium and small rows hidden.
    pub focus_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        let dir = default_data_dir();
        Self {
            state_file: dir.join(format!("{}.json", STORAGE_KEY)),
            log_file: dir.join("focus.log"),
            log_level: DEFAULT_LEVEL.to_string(),
            log_max_lines: DEFAULT_MAX_LINES,
            check_interval_secs: DEFAULT_CHECK_INTERVAL_SECS,
            focus_mode: false,
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Precedence: CLI args > env vars > config file > defaults.
    ///
    /// A config file that cannot be read or parsed is skipped; the error is
    /// returned alongside so the caller can warn about it once logging is up.
    pub fn load(cli_args: &CliArgs) -> (Self, Option<ConfigError>) {
        let mut config = Self::default();
        let mut problem = None;

        let path = match cli_args.config {
            Some(ref path) => Some(PathBuf::from(path)),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Some(PathBuf::from(DEFAULT_CONFIG_FILE))
            }
            None => None,
        };

        if let Some(path) = path {
            match toml::load_from_file(&path) {
                Ok(file_config) => config.merge_from(file_config),
                Err(e) => problem = Some(e),
            }
        }

        config.apply_env();
        config.apply_cli(cli_args);

        (config, problem)
    }

    /// Parse TOML content into configuration over the defaults.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.merge_from(toml::parse_toml(content)?);
        Ok(config)
    }

    /// Apply environment variables.
    fn apply_env(&mut self) {
        env::apply_env(self);
    }

    /// Apply CLI arguments.
    pub(super) fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(ref path) = args.state_file {
            self.state_file = PathBuf::from(path);
        }
        if let Some(ref path) = args.log_file {
            self.log_file = PathBuf::from(path);
        }
        if let Some(secs) = args.interval {
            self.check_interval_secs = secs;
        }
        if args.focus {
            self.focus_mode = true;
        }
    }

    /// Overlay the values a config file actually set.
    pub(super) fn merge_from(&mut self, file: FileConfig) {
        if let Some(path) = file.storage.file {
            self.state_file = path;
        }
        if let Some(path) = file.log.file {
            self.log_file = path;
        }
        if let Some(level) = file.log.level {
            self.log_level = level;
        }
        if let Some(n) = file.log.max_lines {
            self.log_max_lines = n;
        }
        if let Some(secs) = file.day_check.interval_secs {
            self.check_interval_secs = secs;
        }
        if let Some(on) = file.display.focus_mode {
            self.focus_mode = on;
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading config file.
    #[error("config I/O error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Parse error in config file.
    #[error("config parse error: {0}")]
    Parse(String),
}
