//! # Report Module
//!
//! This module records what happened to each managed file during a run and
//! can write that record as a JSON report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::error::StampError;

/// Outcome for one managed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
  /// The file had no header and one was added (or would be, in check mode)
  Stamped,
  /// An existing header was replaced (or would be, in check mode)
  Refreshed,
  /// The file already had the current header and footer
  Unchanged,
  /// The file could not be processed
  Failed,
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  pub action: FileAction,
  /// Error kind (`IOFailure`, `EncodingFailure`, ...) when the file failed
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error_kind: Option<&'static str>,
  /// Error message when the file failed
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl FileReport {
  pub const fn new(path: PathBuf, action: FileAction) -> Self {
    Self {
      path,
      action,
      error_kind: None,
      error: None,
    }
  }

  pub fn failed(path: PathBuf, err: &StampError) -> Self {
    Self {
      path,
      action: FileAction::Failed,
      error_kind: Some(err.kind()),
      error: Some(err.to_string()),
    }
  }

  /// Whether the file's content differs (or would differ) from its stamped form.
  pub const fn is_change(&self) -> bool {
    matches!(self.action, FileAction::Stamped | FileAction::Refreshed)
  }
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Summary counts for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingSummary {
  pub total_files: usize,
  pub stamped: usize,
  pub refreshed: usize,
  pub unchanged: usize,
  pub failed: usize,
  #[serde(serialize_with = "serialize_duration")]
  pub processing_time: Duration,
}

fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_f64(duration.as_secs_f64())
}

impl ProcessingSummary {
  pub fn from_reports(reports: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: reports.len(),
      processing_time,
      ..Self::default()
    };

    for report in reports {
      match report.action {
        FileAction::Stamped => summary.stamped += 1,
        FileAction::Refreshed => summary.refreshed += 1,
        FileAction::Unchanged => summary.unchanged += 1,
        FileAction::Failed => summary.failed += 1,
      }
    }

    summary
  }

  pub const fn changed(&self) -> usize {
    self.stamped + self.refreshed
  }

  pub const fn has_failures(&self) -> bool {
    self.failed > 0
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  year: &'a str,
  check_only: bool,
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Writes the JSON report of a run.
pub struct ReportGenerator<'a> {
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(output_path: &'a Path) -> Self {
    Self { output_path }
  }

  /// Serialises the reports and summary to the output path.
  ///
  /// # Errors
  ///
  /// Returns an error if serialisation fails or the file cannot be written.
  pub fn generate(&self, files: &[FileReport], summary: &ProcessingSummary, year: &str, check_only: bool) -> Result<()> {
    let report = JsonReport {
      generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
      year,
      check_only,
      summary,
      files,
    };

    let content = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }
}
