//! # copystamp
//!
//! A tool that stamps a copyright header and footer onto C, C++ and Python
//! sources.

use anyhow::Result;
use copystamp::cli::{Cli, run_stamp};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_stamp(cli.stamp_args)
}
