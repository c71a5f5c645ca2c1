use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::types::ConfigError;

/// The sections of focus.toml. Every key is optional; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub storage: StorageSection,
    pub log: LogSection,
    pub day_check: DayCheckSection,
    pub display: DisplaySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct StorageSection {
    pub file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct LogSection {
    pub file: Option<PathBuf>,
    pub level: Option<String>,
    pub max_lines: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct DayCheckSection {
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct DisplaySection {
    pub focus_mode: Option<bool>,
}

pub(super) fn load_from_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&content)
}

pub(super) fn parse_toml(content: &str) -> Result<FileConfig, ConfigError> {
    ::toml::from_str(content).map_err(|e| ConfigError::Parse(e.message().to_string()))
}
