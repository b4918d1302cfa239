//! # Templates Module
//!
//! This module loads the header and footer templates, substitutes the
//! copyright year into them, and formats them as line comments for each
//! [`CommentStyle`].
//!
//! The module includes:
//! - [`Template`] for a raw template containing the `%year%` placeholder
//! - [`LicenseData`] for the values substituted into templates
//! - [`Templates`] for the fully prepared, read-only header/footer pair that is
//!   shared by every file of a run
//! - [`format_with_comment_style`] for turning text into comment lines
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use copystamp::comment_style::CommentStyle;
//! use copystamp::templates::{LicenseData, Templates};
//!
//! # fn main() -> anyhow::Result<()> {
//! let license_data = LicenseData {
//!   year: "2025".to_string(),
//! };
//!
//! let templates = Templates::load(
//!   Path::new("scripts/license_template_header.txt"),
//!   Path::new("scripts/license_template.txt"),
//!   &license_data,
//! )?;
//!
//! let header = &templates.for_style(CommentStyle::Hash).header;
//! println!("{}", header.lines().join("\n"));
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use chrono::Datelike;
use tracing::{debug, trace};

use crate::comment_style::CommentStyle;
use crate::error::StampError;

/// Placeholder replaced by the copyright year in both templates.
pub const YEAR_PLACEHOLDER: &str = "%year%";

/// Data used to fill out a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseData {
  /// The copyright year to stamp, as four digits
  pub year: String,
}

impl LicenseData {
  /// License data for the current UTC year.
  pub fn for_current_year() -> Self {
    Self {
      year: chrono::Utc::now().year().to_string(),
    }
  }
}

/// A raw template as read from disk, placeholder still in place.
#[derive(Debug, Clone)]
pub struct Template {
  path: PathBuf,
  text: String,
}

impl Template {
  /// Reads a template from a file.
  ///
  /// # Errors
  ///
  /// Returns [`StampError::Io`] if the file cannot be read and
  /// [`StampError::Encoding`] if it is not UTF-8.
  pub fn load(path: &Path) -> Result<Self, StampError> {
    debug!("Loading template from: {}", path.display());

    let bytes = std::fs::read(path).map_err(|e| StampError::io(path, e))?;
    let text = String::from_utf8(bytes).map_err(|_| StampError::Encoding {
      path: path.to_path_buf(),
    })?;

    trace!("Template content:\n{}", text);

    Ok(Self::from_text(path, text))
  }

  /// Builds a template from in-memory text. `path` is only used in error
  /// messages.
  pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      text: text.into(),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Replaces every placeholder with the year from `data`.
  pub fn render(&self, data: &LicenseData) -> String {
    self.text.replace(YEAR_PLACEHOLDER, &data.year)
  }

  fn first_line(&self) -> Option<&str> {
    self.text.lines().next()
  }
}

/// A template rendered into comment lines for one comment style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedBlock {
  lines: Vec<String>,
}

impl FormattedBlock {
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  pub(crate) fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn first_line(&self) -> Option<&str> {
    self.lines.first().map(String::as_str)
  }
}

/// Header and footer prepared for one comment style.
#[derive(Debug, Clone)]
pub struct StyledTemplates {
  pub style: CommentStyle,
  pub header: FormattedBlock,
  pub footer: FormattedBlock,
  /// Byte offset of the year placeholder in the formatted, unsubstituted
  /// first header line. Existing headers are compared up to this offset.
  pub year_offset: usize,
}

/// The prepared header/footer pair for every comment style.
///
/// Built once per run and only read afterwards.
#[derive(Debug, Clone)]
pub struct Templates {
  hash: StyledTemplates,
  double_slash: StyledTemplates,
}

impl Templates {
  /// Loads both templates from disk and prepares them.
  ///
  /// # Errors
  ///
  /// Fails if either file cannot be read, or if the header's first line has no
  /// year placeholder.
  pub fn load(header_path: &Path, footer_path: &Path, data: &LicenseData) -> Result<Self, StampError> {
    let header = Template::load(header_path)?;
    let footer = Template::load(footer_path)?;
    Self::new(&header, &footer, data)
  }

  /// Prepares already loaded templates.
  ///
  /// # Errors
  ///
  /// Returns [`StampError::TemplateMalformed`] if the header's first line has
  /// no year placeholder.
  pub fn new(header: &Template, footer: &Template, data: &LicenseData) -> Result<Self, StampError> {
    debug!("Rendering templates with year: {}", data.year);

    let rendered_header = header.render(data);
    let rendered_footer = footer.render(data);

    let prepare = |style: CommentStyle| -> Result<StyledTemplates, StampError> {
      let year_offset = header
        .first_line()
        .map(|line| format_line(line, style))
        .and_then(|line| line.find(YEAR_PLACEHOLDER))
        .ok_or_else(|| StampError::TemplateMalformed {
          path: header.path().to_path_buf(),
          token: YEAR_PLACEHOLDER,
        })?;

      Ok(StyledTemplates {
        style,
        header: format_with_comment_style(&rendered_header, style),
        footer: format_with_comment_style(&rendered_footer, style),
        year_offset,
      })
    };

    Ok(Self {
      hash: prepare(CommentStyle::Hash)?,
      double_slash: prepare(CommentStyle::DoubleSlash)?,
    })
  }

  pub const fn for_style(&self, style: CommentStyle) -> &StyledTemplates {
    match style {
      CommentStyle::Hash => &self.hash,
      CommentStyle::DoubleSlash => &self.double_slash,
    }
  }
}

/// Formats text as line comments.
///
/// Each line is prefixed with the style's marker and a space, then trailing
/// whitespace is trimmed, so empty lines become the bare marker.
pub fn format_with_comment_style(text: &str, style: CommentStyle) -> FormattedBlock {
  FormattedBlock {
    lines: text.lines().map(|line| format_line(line, style)).collect(),
  }
}

fn format_line(line: &str, style: CommentStyle) -> String {
  format!("{} {}", style.prefix(), line).trim_end().to_string()
}
