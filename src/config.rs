//! # Configuration Module
//!
//! This module provides configuration support for copystamp: where the header
//! and footer templates live and which year to stamp.
//!
//! Configuration can be specified in a `.copystamp.toml` file in the root
//! being stamped, or via the `COPYSTAMP_CONFIG` environment variable.
//!
//! ```toml
//! header = "scripts/license_template_header.txt"
//! footer = "scripts/license_template.txt"
//! year = "2025"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".copystamp.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "COPYSTAMP_CONFIG";

/// Header template used when nothing else is configured, relative to the root.
pub const DEFAULT_HEADER_TEMPLATE: &str = "scripts/license_template_header.txt";

/// Footer template used when nothing else is configured, relative to the root.
pub const DEFAULT_FOOTER_TEMPLATE: &str = "scripts/license_template.txt";

/// Main configuration struct for copystamp.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Path of the header template. Relative paths are resolved against the
  /// config file's directory.
  #[serde(default)]
  pub header: Option<PathBuf>,

  /// Path of the footer template. Relative paths are resolved against the
  /// config file's directory.
  #[serde(default)]
  pub footer: Option<PathBuf>,

  /// Year to stamp instead of the current one.
  #[serde(default)]
  pub year: Option<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// The configured year is not four digits.
  #[error("Invalid year '{year}': expected four digits")]
  InvalidYear { year: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// Relative template paths are made relative to the file's directory.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_relative_to(base))
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(ref year) = self.year {
      validate_year(year)?;
    }
    Ok(())
  }

  fn resolve_relative_to(self, base: &Path) -> Self {
    let resolve = |path: PathBuf| if path.is_absolute() { path } else { base.join(path) };

    Self {
      header: self.header.map(resolve),
      footer: self.footer.map(resolve),
      year: self.year,
    }
  }
}

/// Checks that a year is exactly four ASCII digits.
pub fn validate_year(year: &str) -> Result<(), ConfigError> {
  if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
    Ok(())
  } else {
    Err(ConfigError::InvalidYear { year: year.to_string() })
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `COPYSTAMP_CONFIG` environment variable
/// 3. `.copystamp.toml` in the root directory
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.is_file() {
    verbose_log!("Using root config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// Returns `None` if discovery is disabled or no file was found. An explicit
/// path that does not exist is an error.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  if let Some(path) = explicit_path
    && !path.exists()
  {
    anyhow::bail!("Config file does not exist: {}", path.display());
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
