//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! Writes go to a temporary file in the same directory which then replaces the
//! original, so a failure mid-write leaves the original untouched.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::trace;

use crate::error::StampError;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads a whole file as UTF-8 text.
  ///
  /// # Errors
  ///
  /// Returns [`StampError::Io`] if the file cannot be read and
  /// [`StampError::Encoding`] if it is not valid UTF-8.
  pub fn read_source(path: &Path) -> Result<String, StampError> {
    let bytes = std::fs::read(path).map_err(|e| StampError::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| StampError::Encoding {
      path: path.to_path_buf(),
    })
  }

  /// Replaces a file's content atomically.
  ///
  /// Symlinks are resolved first so the link itself survives, and the
  /// original permissions are carried over to the new file.
  ///
  /// # Errors
  ///
  /// Returns [`StampError::Io`] if the temporary file cannot be prepared and
  /// [`StampError::Persist`] if it cannot be moved over the original.
  pub fn write_atomic(path: &Path, content: &str) -> Result<(), StampError> {
    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = parent_dir(&target);

    let mut temp = NamedTempFile::new_in(&dir).map_err(|e| StampError::io(&dir, e))?;
    trace!("Writing {} via {}", target.display(), temp.path().display());

    temp
      .write_all(content.as_bytes())
      .and_then(|()| temp.as_file().sync_all())
      .map_err(|e| StampError::io(temp.path(), e))?;

    if let Ok(metadata) = std::fs::metadata(&target) {
      std::fs::set_permissions(temp.path(), metadata.permissions()).map_err(|e| StampError::io(temp.path(), e))?;
    }

    temp.persist(&target).map_err(|e| StampError::Persist {
      path: target.clone(),
      source: e.error,
    })?;

    Ok(())
  }
}

fn parent_dir(path: &Path) -> PathBuf {
  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  }
}
