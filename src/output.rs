//! # Output Module
//!
//! This module centralizes all user-facing output for copystamp.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! Lists and the summary go to stdout; per-file errors and diffs go to stderr.
//! With `-q`, the changed-file lists collapse to bare paths so they can be
//! piped, and everything else is silent.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileAction, FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Stamped/all good
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Header refreshed
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Stamping files under ..." or "Checking files under ..." message.
pub fn print_start_message(root: &Path, check_only: bool) {
  if is_quiet() {
    return;
  }

  let verb = if check_only { "Checking" } else { "Stamping" };
  println!("{} files under {}...", verb, root.display());
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

fn files_word(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Prints a titled list of paths, truncated unless verbose.
///
/// In quiet mode only the paths are printed, one per line.
fn print_file_list(title: &str, files: &[&FileReport], root: Option<&Path>) {
  if files.is_empty() {
    return;
  }

  let mut sorted_files: Vec<_> = files.to_vec();
  sorted_files.sort_by(|a, b| a.path.cmp(&b.path));

  if is_quiet() {
    for file in &sorted_files {
      println!("{}", make_relative_path(&file.path, root));
    }
    return;
  }

  println!("{}", title);

  let count = sorted_files.len();
  let limit = if is_verbose() { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in sorted_files.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, root));
  }

  if count > limit {
    println!(
      "  {} more (use -v to see all)",
      format!("... and {}", count - limit).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

/// Print the files that received a header for the first time.
pub fn print_stamped_files(files: &[&FileReport], root: Option<&Path>, check_only: bool) {
  let verb = if check_only { "would be stamped" } else { "stamped" };
  let title = format!(
    "{} {} {} {}:",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    files.len(),
    files_word(files.len()),
    verb
  );
  print_file_list(&title, files, root);
}

/// Print the files whose existing header was replaced.
pub fn print_refreshed_files(files: &[&FileReport], root: Option<&Path>, check_only: bool) {
  let verb = if check_only { "would be refreshed" } else { "refreshed" };
  let title = format!(
    "{} {} {} {}:",
    symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
    files.len(),
    files_word(files.len()),
    verb
  );
  print_file_list(&title, files, root);
}

/// Print the files that failed, with their error kind.
///
/// Failures are always shown, even in quiet mode, on stderr.
pub fn print_failed_files(files: &[&FileReport], root: Option<&Path>) {
  if files.is_empty() {
    return;
  }

  eprintln!(
    "{} {} {} failed:",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    files.len(),
    files_word(files.len())
  );
  for file in files {
    eprintln!(
      "  {} ({})",
      make_relative_path(&file.path, root),
      file.error_kind.unwrap_or("Unknown")
    );
  }
}

/// Print the success message when nothing needed to change.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files carry the current header and footer.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X stamped, Y refreshed, Z unchanged, W failed"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let failed_str = if summary.failed > 0 {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };

  let mut summary_line = format!(
    "Summary: {} stamped, {} refreshed, {} unchanged, {} failed",
    summary.stamped.if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.refreshed.if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.unchanged.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    failed_str
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// File reports grouped by outcome.
pub struct CategorizedReports<'a> {
  pub stamped: Vec<&'a FileReport>,
  pub refreshed: Vec<&'a FileReport>,
  pub unchanged: Vec<&'a FileReport>,
  pub failed: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Categorize a slice of file reports.
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut categorized = Self {
      stamped: Vec::new(),
      refreshed: Vec::new(),
      unchanged: Vec::new(),
      failed: Vec::new(),
    };

    for report in reports {
      match report.action {
        FileAction::Stamped => categorized.stamped.push(report),
        FileAction::Refreshed => categorized.refreshed.push(report),
        FileAction::Unchanged => categorized.unchanged.push(report),
        FileAction::Failed => categorized.failed.push(report),
      }
    }

    categorized
  }

  pub fn has_changes(&self) -> bool {
    !self.stamped.is_empty() || !self.refreshed.is_empty()
  }
}

/// Make a path relative to the root for display.
fn make_relative_path(path: &Path, root: Option<&Path>) -> String {
  if let Some(root) = root {
    path
      .strip_prefix(root)
      .map(|p| p.to_string_lossy().to_string())
      .unwrap_or_else(|_| path.to_string_lossy().to_string())
  } else {
    path.to_string_lossy().to_string()
  }
}
