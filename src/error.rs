//! # Error Module
//!
//! Errors raised while stamping a single file or preparing the templates.
//!
//! Application seams (CLI, config discovery) wrap these in [`anyhow::Error`];
//! the processor keeps them typed so it can record a per-file failure and keep
//! walking.

use std::path::{Path, PathBuf};

/// Errors produced by template loading and per-file rewriting.
#[derive(Debug, thiserror::Error)]
pub enum StampError {
  /// The first line of the header template has no `%year%` placeholder, so
  /// previously stamped files could never be recognised.
  #[error("Header template '{path}' is malformed: the first line must contain the {token} placeholder")]
  TemplateMalformed { path: PathBuf, token: &'static str },

  /// A file could not be read, listed or inspected.
  #[error("I/O failure on '{path}': {source}")]
  Io { path: PathBuf, source: std::io::Error },

  /// A file is not valid UTF-8 text.
  #[error("'{path}' is not valid UTF-8 text")]
  Encoding { path: PathBuf },

  /// The rewritten content could not be moved over the original.
  #[error("Failed to replace '{path}': {source}")]
  Persist { path: PathBuf, source: std::io::Error },
}

impl StampError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }

  /// The file the error is about.
  pub fn path(&self) -> &Path {
    match self {
      Self::TemplateMalformed { path, .. }
      | Self::Io { path, .. }
      | Self::Encoding { path }
      | Self::Persist { path, .. } => path,
    }
  }

  /// Short, stable name of the failed rule, used in reports.
  pub const fn kind(&self) -> &'static str {
    match self {
      Self::TemplateMalformed { .. } => "TemplateMalformed",
      Self::Io { .. } | Self::Persist { .. } => "IOFailure",
      Self::Encoding { .. } => "EncodingFailure",
    }
  }
}
