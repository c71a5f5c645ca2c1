//! Configuration loading for focus.
//!
//! Supports focus.toml, CLI flags, and environment variables.
//! Precedence (highest to lowest): CLI flags > env vars > config file > defaults.

mod cli;
mod env;
mod toml;
mod types;

pub use cli::{parse_args, CliArgs, Command};
pub use types::{default_data_dir, Config, ConfigError, DEFAULT_CONFIG_FILE};
