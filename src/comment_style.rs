//! # Comment Style Module
//!
//! The closed set of file kinds copystamp manages and the single-line comment
//! prefix used for each of them.
//!
//! The allow-list is fixed at compile time. [`SourceKind::from_file_name`]
//! decides whether a file is managed at all, [`CommentStyle::for_file_name`]
//! decides how its header is commented.

use std::fmt;

/// Single-line comment prefix used for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentStyle {
  /// `#` comments (Python).
  Hash,
  /// `//` comments (C and C++).
  DoubleSlash,
}

impl CommentStyle {
  /// Every style, in a stable order.
  pub const ALL: [Self; 2] = [Self::Hash, Self::DoubleSlash];

  /// The comment marker that starts each line.
  pub const fn prefix(self) -> &'static str {
    match self {
      Self::Hash => "#",
      Self::DoubleSlash => "//",
    }
  }

  /// Resolves the comment style from a file name.
  ///
  /// Names ending in the script extension use `#`, everything else `//`.
  /// Callers only pass names already accepted by
  /// [`SourceKind::from_file_name`].
  pub fn for_file_name(file_name: &str) -> Self {
    if file_name.ends_with(SourceKind::Python.extension()) {
      Self::Hash
    } else {
      Self::DoubleSlash
    }
  }
}

impl fmt::Display for CommentStyle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.prefix())
  }
}

/// A managed file kind, one per allow-listed extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
  Cpp,
  Cc,
  Cxx,
  C,
  Hpp,
  H,
  Python,
}

impl SourceKind {
  /// The allow-list, in match order. Each suffix starts with a dot, so at most
  /// one entry can match a given name.
  pub const ALL: [Self; 7] = [
    Self::Cpp,
    Self::Cc,
    Self::Cxx,
    Self::C,
    Self::Hpp,
    Self::H,
    Self::Python,
  ];

  pub const fn extension(self) -> &'static str {
    match self {
      Self::Cpp => ".cpp",
      Self::Cc => ".cc",
      Self::Cxx => ".cxx",
      Self::C => ".c",
      Self::Hpp => ".hpp",
      Self::H => ".h",
      Self::Python => ".py",
    }
  }

  /// Case-sensitive suffix match against the allow-list; first match wins.
  pub fn from_file_name(file_name: &str) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|kind| file_name.ends_with(kind.extension()))
  }

  pub const fn comment_style(self) -> CommentStyle {
    match self {
      Self::Python => CommentStyle::Hash,
      Self::Cpp | Self::Cc | Self::Cxx | Self::C | Self::Hpp | Self::H => CommentStyle::DoubleSlash,
    }
  }
}
