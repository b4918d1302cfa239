//! # File Collector Module
//!
//! This module walks a directory tree and yields the files copystamp manages.
//!
//! The walk is lazy: the caller rewrites each yielded file before the next
//! directory entry is read. Symlinks are followed; walkdir reports cycles,
//! which are skipped, and a visited set of canonical paths keeps a file that is
//! reachable through several links from being yielded twice.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::comment_style::SourceKind;
use crate::error::StampError;

/// A file selected by the extension allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedFile {
  pub path: PathBuf,
  pub kind: SourceKind,
}

/// Directory traversal for the processor.
#[derive(Debug, Clone)]
pub struct FileCollector {
  follow_links: bool,
}

impl Default for FileCollector {
  fn default() -> Self {
    Self::new()
  }
}

impl FileCollector {
  pub const fn new() -> Self {
    Self { follow_links: true }
  }

  /// Do not descend into symlinked directories or rewrite symlinked files.
  pub const fn without_following_links(mut self) -> Self {
    self.follow_links = false;
    self
  }

  /// Walks `root` depth-first in name order.
  ///
  /// Yields every regular file whose name matches the allow-list. A root that
  /// is itself a file is yielded if it matches. Entries that cannot be read are
  /// yielded as errors and the walk carries on.
  pub fn walk(&self, root: &Path) -> impl Iterator<Item = Result<ManagedFile, StampError>> + use<> {
    debug!("Scanning directory: {}", root.display());

    let root = root.to_path_buf();
    let mut visited: HashSet<PathBuf> = HashSet::new();

    WalkDir::new(&root)
      .follow_links(self.follow_links)
      .sort_by_file_name()
      .into_iter()
      .filter_map(move |entry| {
        let entry = match entry {
          Ok(entry) => entry,
          Err(err) => return walk_error(err, &root),
        };

        if !entry.file_type().is_file() {
          return None;
        }

        let Some(kind) = entry.file_name().to_str().and_then(SourceKind::from_file_name) else {
          trace!("Skipping: {} (extension not managed)", entry.path().display());
          return None;
        };

        let identity = std::fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf());
        if !visited.insert(identity) {
          debug!("Skipping: {} (already visited through another path)", entry.path().display());
          return None;
        }

        Some(Ok(ManagedFile {
          path: entry.into_path(),
          kind,
        }))
      })
  }
}

fn walk_error(err: walkdir::Error, root: &Path) -> Option<Result<ManagedFile, StampError>> {
  let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);

  if let Some(ancestor) = err.loop_ancestor() {
    warn!(
      "Skipping: {} (symlink loop back to {})",
      path.display(),
      ancestor.display()
    );
    return None;
  }

  if is_dangling_symlink(&path) {
    warn!("Skipping: {} (dangling symlink)", path.display());
    return None;
  }

  let source = err
    .into_io_error()
    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
  Some(Err(StampError::io(path, source)))
}

fn is_dangling_symlink(path: &Path) -> bool {
  std::fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink()) && std::fs::metadata(path).is_err()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  fn collect(root: &Path) -> Vec<PathBuf> {
    FileCollector::new()
      .walk(root)
      .map(|entry| entry.expect("walk entry").path)
      .collect()
  }

  #[test]
  fn test_walk_selects_allow_listed_files_recursively() {
    let dir = tempdir().expect("create temp dir");
    let nested = dir.path().join("src").join("deep");
    fs::create_dir_all(&nested).expect("mkdir");
    fs::write(dir.path().join("main.cpp"), "").expect("write");
    fs::write(dir.path().join("README.md"), "").expect("write");
    fs::write(nested.join("util.h"), "").expect("write");
    fs::write(nested.join("tool.py"), "").expect("write");
    fs::write(nested.join("notes.txt"), "").expect("write");

    let files = collect(dir.path());

    assert_eq!(
      files,
      vec![
        dir.path().join("main.cpp"),
        nested.join("tool.py"),
        nested.join("util.h"),
      ]
    );
  }

  #[test]
  fn test_walk_reports_kind() {
    let dir = tempdir().expect("create temp dir");
    fs::write(dir.path().join("a.cxx"), "").expect("write");

    let files: Vec<_> = FileCollector::new()
      .walk(dir.path())
      .collect::<Result<_, _>>()
      .expect("walk");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].kind, SourceKind::Cxx);
  }

  #[test]
  fn test_walk_single_file_root() {
    let dir = tempdir().expect("create temp dir");
    let file = dir.path().join("only.c");
    fs::write(&file, "").expect("write");

    assert_eq!(collect(&file), vec![file.clone()]);
  }

  #[test]
  fn test_walk_missing_root_is_error() {
    let dir = tempdir().expect("create temp dir");
    let results: Vec<_> = FileCollector::new().walk(&dir.path().join("missing")).collect();
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(StampError::Io { .. })));
  }

  #[cfg(unix)]
  #[test]
  fn test_walk_survives_symlink_cycle_and_dedups() {
    let dir = tempdir().expect("create temp dir");
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).expect("mkdir");
    fs::write(sub.join("a.cc"), "").expect("write");
    std::os::unix::fs::symlink(dir.path(), sub.join("loop")).expect("symlink loop");
    std::os::unix::fs::symlink(sub.join("a.cc"), dir.path().join("alias.cc")).expect("symlink file");

    let results: Vec<_> = FileCollector::new().walk(dir.path()).collect();

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(results.len(), 1);
  }

  #[cfg(unix)]
  #[test]
  fn test_walk_skips_dangling_symlink() {
    let dir = tempdir().expect("create temp dir");
    std::os::unix::fs::symlink(dir.path().join("nowhere.c"), dir.path().join("broken.c")).expect("symlink");
    fs::write(dir.path().join("ok.c"), "").expect("write");

    assert_eq!(collect(dir.path()), vec![dir.path().join("ok.c")]);
  }
}
