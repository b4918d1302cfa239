//! # Processor Module
//!
//! This module contains the core functionality for stamping files: walking a
//! tree, detecting existing headers, and rewriting each file with a fresh
//! header and footer.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - Whole-file reads and atomic writes
//! - [`content_transformer`] - Header detection, stripping and composition
//! - [`file_collector`] - Directory traversal and the extension allow-list
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules. A run is single-threaded: each file is read, rewritten and
//! closed before the walk moves on.

pub mod content_transformer;
pub mod file_collector;
pub mod file_io;

use std::path::Path;

use anyhow::{Result, bail};
pub use content_transformer::{ContentTransformer, Transformed};
pub use file_collector::{FileCollector, ManagedFile};
pub use file_io::FileIO;
use tracing::{debug, trace};

use crate::comment_style::CommentStyle;
use crate::diff::DiffManager;
use crate::error::StampError;
use crate::info_log;
use crate::report::{FileAction, FileReport};
use crate::templates::Templates;

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub templates: Templates,

  /// Only report what would change; never write
  pub check_only: bool,

  /// Follow symlinked files and directories during the walk
  pub follow_links: bool,

  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with the default behaviour: modify files,
  /// follow symlinks, no diffs.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(templates)
  /// }
  /// ```
  pub const fn new(templates: Templates) -> Self {
    Self {
      templates,
      check_only: false,
      follow_links: true,
      diff_manager: None,
    }
  }
}

/// Processor for stamping headers and footers onto files.
///
/// The `Processor` is responsible for:
/// - Walking a directory tree and selecting allow-listed files
/// - Detecting headers applied in earlier runs, whatever their year
/// - Replacing or adding the header and footer
/// - Recording a report for every file, including failures
pub struct Processor {
  templates: Templates,
  check_only: bool,
  diff_manager: DiffManager,
  file_collector: FileCollector,
}

impl Processor {
  pub fn new(config: ProcessorConfig) -> Self {
    let file_collector = if config.follow_links {
      FileCollector::new()
    } else {
      FileCollector::new().without_following_links()
    };

    Self {
      templates: config.templates,
      check_only: config.check_only,
      diff_manager: config.diff_manager.unwrap_or_default(),
      file_collector,
    }
  }

  /// Stamps every allow-listed file under `root`.
  ///
  /// Failures on individual files are logged and recorded, and the walk
  /// continues. The returned reports are in walk order.
  ///
  /// # Errors
  ///
  /// Returns an error only if `root` does not exist.
  pub fn process(&self, root: &Path) -> Result<Vec<FileReport>> {
    if !root.exists() {
      bail!("Path does not exist: {}", root.display());
    }

    let mut reports = Vec::new();
    for entry in self.file_collector.walk(root) {
      let report = match entry {
        Ok(file) => self.process_managed_file(&file),
        Err(e) => {
          eprintln!("Error: {}", e);
          FileReport::failed(e.path().to_path_buf(), &e)
        }
      };
      reports.push(report);
    }

    debug!("Processed {} files under {}", reports.len(), root.display());
    Ok(reports)
  }

  fn process_managed_file(&self, file: &ManagedFile) -> FileReport {
    match self.process_file(&file.path, file.kind.comment_style()) {
      Ok(action) => FileReport::new(file.path.clone(), action),
      Err(e) => {
        eprintln!("Error processing {}: {}", file.path.display(), e);
        FileReport::failed(file.path.clone(), &e)
      }
    }
  }

  /// Stamps a single file.
  ///
  /// `style` is the comment style of the file's kind as selected by the walk.
  /// In check mode the file is only read, and the returned action says what a real run would do.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, is not UTF-8, or cannot be
  /// replaced.
  pub fn process_file(&self, path: &Path, style: CommentStyle) -> Result<FileAction, StampError> {
    trace!("Processing file: {}", path.display());

    let content = FileIO::read_source(path)?;
    let transformed = ContentTransformer::new(&self.templates).transform(style, &content);

    if transformed.content == content {
      trace!("Unchanged: {}", path.display());
      return Ok(FileAction::Unchanged);
    }

    let action = if transformed.had_header {
      FileAction::Refreshed
    } else {
      FileAction::Stamped
    };

    if self.check_only {
      if let Err(e) = self.diff_manager.display_diff(path, &content, &transformed.content) {
        eprintln!("Warning: Failed to display diff for {}: {}", path.display(), e);
      }
      return Ok(action);
    }

    FileIO::write_atomic(path, &transformed.content)?;
    match action {
      FileAction::Stamped => info_log!("Stamped: {}", path.display()),
      _ => info_log!("Refreshed: {}", path.display()),
    }

    Ok(action)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;
  use crate::templates::{LicenseData, Template};

  fn processor(year: &str, check_only: bool) -> Processor {
    let header = Template::from_text("header.txt", "Copyright %year% source2gen");
    let footer = Template::from_text("footer.txt", "MIT License");
    let templates =
      Templates::new(&header, &footer, &LicenseData { year: year.to_string() }).expect("valid templates");
    Processor::new(ProcessorConfig {
      check_only,
      ..ProcessorConfig::new(templates)
    })
  }

  #[test]
  fn test_process_file_stamps_then_unchanged() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("main.c");
    fs::write(&path, "int main() {}\n").expect("write");

    let processor = processor("2024", false);
    assert_eq!(processor.process_file(&path, CommentStyle::DoubleSlash).expect("first run"), FileAction::Stamped);
    assert_eq!(
      fs::read_to_string(&path).expect("read"),
      "// Copyright 2024 source2gen\nint main() {}\n\n// MIT License\n"
    );
    assert_eq!(processor.process_file(&path, CommentStyle::DoubleSlash).expect("second run"), FileAction::Unchanged);
  }

  #[test]
  fn test_process_file_refreshes_year() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("tool.py");
    fs::write(&path, "# Copyright 2023 source2gen\nx = 1\n\n# MIT License\n").expect("write");

    let action = processor("2024", false).process_file(&path, CommentStyle::Hash).expect("run");

    assert_eq!(action, FileAction::Refreshed);
    assert_eq!(
      fs::read_to_string(&path).expect("read"),
      "# Copyright 2024 source2gen\nx = 1\n\n# MIT License\n"
    );
  }

  #[test]
  fn test_check_only_never_writes() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("main.cc");
    fs::write(&path, "int x;\n").expect("write");

    let action = processor("2024", true).process_file(&path, CommentStyle::DoubleSlash).expect("run");

    assert_eq!(action, FileAction::Stamped);
    assert_eq!(fs::read_to_string(&path).expect("read"), "int x;\n");
  }

  #[test]
  fn test_process_records_failures_and_continues() {
    let dir = tempdir().expect("create temp dir");
    fs::write(dir.path().join("a_bad.c"), [0xFF, 0xFE]).expect("write");
    fs::write(dir.path().join("b_good.c"), "int y;\n").expect("write");

    let reports = processor("2024", false).process(dir.path()).expect("walk");

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].action, FileAction::Failed);
    assert_eq!(reports[0].error_kind, Some("EncodingFailure"));
    assert_eq!(reports[1].action, FileAction::Stamped);
  }

  #[test]
  fn test_process_comments_each_file_by_its_kind() {
    let dir = tempdir().expect("create temp dir");
    fs::write(dir.path().join("a.py"), "x = 1\n").expect("write");
    fs::write(dir.path().join("b.hpp"), "int y;\n").expect("write");

    let reports = processor("2024", false).process(dir.path()).expect("walk");

    assert!(reports.iter().all(|r| r.action == FileAction::Stamped));
    assert!(fs::read_to_string(dir.path().join("a.py")).expect("read").starts_with("# Copyright 2024"));
    assert!(fs::read_to_string(dir.path().join("b.hpp")).expect("read").starts_with("// Copyright 2024"));
  }

  #[test]
  fn test_process_missing_root_is_error() {
    let dir = tempdir().expect("create temp dir");
    assert!(processor("2024", false).process(&dir.path().join("nope")).is_err());
  }
}
