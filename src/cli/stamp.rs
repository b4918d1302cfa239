//! # Stamp Command
//!
//! This module implements the stamp command: resolve settings from flags,
//! config file and defaults, prepare the templates, walk the root and report.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::{Config, DEFAULT_FOOTER_TEMPLATE, DEFAULT_HEADER_TEMPLATE, load_config, validate_year};
use crate::diff::DiffManager;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  CategorizedReports, print_all_files_ok, print_blank_line, print_failed_files, print_hint, print_refreshed_files,
  print_stamped_files, print_start_message, print_summary,
};
use crate::processor::{Processor, ProcessorConfig};
use crate::report::{ProcessingSummary, ReportGenerator};
use crate::templates::{LicenseData, Templates};

/// Arguments for the stamp command
#[derive(Args, Debug, Default)]
pub struct StampArgs {
  /// Directory (or single file) to stamp. Directories are walked recursively.
  #[arg(default_value = ".")]
  pub root: PathBuf,

  /// Header template; its first line must contain %year%
  /// [default: <ROOT>/scripts/license_template_header.txt]
  #[arg(long, value_name = "FILE")]
  pub header: Option<PathBuf>,

  /// Footer template [default: <ROOT>/scripts/license_template.txt]
  #[arg(long, value_name = "FILE")]
  pub footer: Option<PathBuf>,

  /// Copyright year to stamp [default: current year]
  #[arg(long)]
  pub year: Option<String>,

  /// Path to config file (default: .copystamp.toml in the root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Only report files that would change; exit 1 if any would
  #[arg(long)]
  pub check: bool,

  /// Show diff of changes in check mode
  #[arg(long, requires = "check")]
  pub show_diff: bool,

  /// Save diff of changes to a file in check mode
  #[arg(long, value_name = "FILE", requires = "check")]
  pub save_diff: Option<PathBuf>,

  /// Generate a JSON report of the run and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Do not follow symlinked files and directories
  #[arg(long)]
  pub no_follow_links: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Template paths and year after applying flag > config > default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
  pub header: PathBuf,
  pub footer: PathBuf,
  pub year: String,
}

impl ResolvedSettings {
  /// Merges command-line values over the config file over the defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if the effective year is not four digits.
  pub fn resolve(args: &StampArgs, config: Option<Config>, root: &Path) -> Result<Self> {
    let config = config.unwrap_or_default();

    let header = args
      .header
      .clone()
      .or(config.header)
      .unwrap_or_else(|| root.join(DEFAULT_HEADER_TEMPLATE));
    let footer = args
      .footer
      .clone()
      .or(config.footer)
      .unwrap_or_else(|| root.join(DEFAULT_FOOTER_TEMPLATE));
    let year = match args.year.clone().or(config.year) {
      Some(year) => {
        validate_year(&year)?;
        year
      }
      None => LicenseData::for_current_year().year,
    };

    Ok(Self { header, footer, year })
  }
}

/// Directory that defaults and `.copystamp.toml` are looked up in.
fn settings_root(root: &Path) -> &Path {
  if root.is_file() {
    root.parent().unwrap_or_else(|| Path::new("."))
  } else {
    root
  }
}

/// Run the stamp command with the given arguments
pub fn run_stamp(args: StampArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let root = args.root.clone();
  if !root.exists() {
    eprintln!("ERROR: Path does not exist: {}", root.display());
    process::exit(1);
  }
  let config_root = settings_root(&root);

  let config = load_config(args.config.as_deref(), config_root, args.no_config)?;
  let settings = ResolvedSettings::resolve(&args, config, config_root)?;
  debug!(
    "Using header {}, footer {}, year {}",
    settings.header.display(),
    settings.footer.display(),
    settings.year
  );

  // Nothing is touched unless both templates load and the header is usable.
  let license_data = LicenseData {
    year: settings.year.clone(),
  };
  let templates = Templates::load(&settings.header, &settings.footer, &license_data)
    .context("Failed to prepare license templates")?;

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    check_only: args.check,
    follow_links: !args.no_follow_links,
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::new(templates)
  });

  print_start_message(&root, args.check);

  let start_time = Instant::now();
  let file_reports = processor.process(&root)?;
  let elapsed = start_time.elapsed();

  let summary = ProcessingSummary::from_reports(&file_reports, elapsed);
  let categorized = CategorizedReports::from_reports(&file_reports);
  let display_root = if root.is_dir() { Some(root.as_path()) } else { None };

  print_blank_line();
  if categorized.has_changes() {
    print_stamped_files(&categorized.stamped, display_root, args.check);
    if !categorized.stamped.is_empty() && !categorized.refreshed.is_empty() {
      print_blank_line();
    }
    print_refreshed_files(&categorized.refreshed, display_root, args.check);
  } else if !summary.has_failures() {
    print_all_files_ok();
  }
  print_failed_files(&categorized.failed, display_root);

  print_blank_line();
  print_summary(&summary);

  let check_found_changes = args.check && categorized.has_changes();
  if check_found_changes {
    print_blank_line();
    print_hint("Run without --check to stamp these files.");
  }

  if let Some(ref output_path) = args.report_json {
    let report_generator = ReportGenerator::new(output_path);
    if let Err(e) = report_generator.generate(&file_reports, &summary, &settings.year, args.check) {
      eprintln!("Error generating JSON report: {}", e);
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  if summary.has_failures() || check_found_changes {
    process::exit(1);
  }

  Ok(())
}
