//! # copystamp
//!
//! A tool that stamps a copyright header and footer onto every C, C++ and
//! Python source file under a directory.
//!
//! Headers come from a template whose first line carries a `%year%`
//! placeholder. A file stamped in an earlier year is recognised by the text of
//! that first line before the year, so re-running `copystamp` replaces the old
//! header and footer instead of stacking new ones. Running it twice in a row
//! changes nothing the second time.
//!
//! ## Features
//!
//! * Recursive walk with a closed allow-list: `.cpp`, `.cc`, `.cxx`, `.c`,
//!   `.hpp`, `.h` use `//` comments and `.py` uses `#`
//! * Year refresh for headers stamped in previous years
//! * Check mode with diffs, for CI
//! * Atomic rewrites that preserve permissions and never lose a file
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use copystamp::processor::{Processor, ProcessorConfig};
//! use copystamp::templates::{LicenseData, Templates};
//!
//! fn main() -> anyhow::Result<()> {
//!     let license_data = LicenseData {
//!         year: "2025".to_string(),
//!     };
//!
//!     let templates = Templates::load(
//!         Path::new("scripts/license_template_header.txt"),
//!         Path::new("scripts/license_template.txt"),
//!         &license_data,
//!     )?;
//!
//!     let processor = Processor::new(ProcessorConfig::new(templates));
//!     let reports = processor.process(Path::new("src"))?;
//!
//!     for report in reports.iter().filter(|r| r.is_change()) {
//!         println!("{}: {:?}", report.path.display(), report.action);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Walking, header detection and rewriting
//! * [`templates`] - Template loading and comment formatting
//! * [`comment_style`] - The extension allow-list and comment markers
//! * [`logging`] - Logging utilities for verbose output

pub mod cli;
pub mod comment_style;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
