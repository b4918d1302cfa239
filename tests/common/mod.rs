#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use copystamp::templates::{LicenseData, Template, Templates};
use tempfile::TempDir;

/// First line carries the year; the rest is plain text.
pub const HEADER_TEMPLATE: &str = "Copyright %year% source2gen\nAll rights reserved.\n";

pub const FOOTER_TEMPLATE: &str = "Licensed under the MIT License.\n";

/// Writes the default header and footer templates under `root/scripts`.
pub fn write_default_templates(root: &Path) -> Result<(PathBuf, PathBuf)> {
  let scripts = root.join("scripts");
  fs::create_dir_all(&scripts)?;

  let header = scripts.join("license_template_header.txt");
  let footer = scripts.join("license_template.txt");
  fs::write(&header, HEADER_TEMPLATE)?;
  fs::write(&footer, FOOTER_TEMPLATE)?;

  Ok((header, footer))
}

/// A temp directory with default templates in place.
pub fn setup_workspace() -> Result<TempDir> {
  let temp_dir = tempfile::tempdir()?;
  write_default_templates(temp_dir.path())?;
  Ok(temp_dir)
}

/// Prepared templates for `year`, built from the default template texts.
pub fn templates(year: &str) -> Templates {
  let header = Template::from_text("license_template_header.txt", HEADER_TEMPLATE);
  let footer = Template::from_text("license_template.txt", FOOTER_TEMPLATE);
  Templates::new(&header, &footer, &LicenseData { year: year.to_string() }).expect("default templates are valid")
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}
