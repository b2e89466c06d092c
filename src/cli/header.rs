//! # Header Command
//!
//! Renders the configured license header for a file, ready to be prepended.
//! Commented output ends with a blank line; `--raw` prints the bare header.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use software_dmv::templates::{comment_style_for_file, format_header, format_with_comment_style};

use super::Project;

/// Arguments for the header command
#[derive(Args, Debug, Default)]
pub struct HeaderArgs {
  /// File the header is meant for; its name selects the comment style
  #[arg(value_name = "FILE")]
  pub file: PathBuf,

  /// Print the filled-in header without comment markers
  #[arg(long)]
  pub raw: bool,
}

/// Run the header command
pub fn run_header(project: &Project, args: HeaderArgs) -> Result<()> {
  let Some(license) = project.config.license.as_deref() else {
    bail!("No license chosen yet. Run `software-dmv choose <LICENSE>` first.");
  };

  let info = project
    .catalog
    .get_license_info(license)
    .with_context(|| format!("Failed to load license '{license}'"))?;

  let header = format_header(&info.header_text, &args.file, &project.config)
    .with_context(|| format!("Failed to fill in the header of '{license}'"))?;

  // Printed even with --quiet: the header is the command's result.
  if args.raw {
    print!("{header}");
  } else {
    let style = comment_style_for_file(&args.file);
    // Trailing blank line separates the header from the file's own content.
    println!("{}", format_with_comment_style(&header, &style));
  }

  Ok(())
}
