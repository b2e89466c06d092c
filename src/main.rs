//! # software-dmv
//!
//! Where you go to get your software license.

mod cli;

use anyhow::Result;

use crate::cli::Cli;

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  cli::run(cli)
}
