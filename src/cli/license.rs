//! # License Command
//!
//! Describes a single license: its metadata, the parameters it needs and its
//! header template.

use anyhow::{Context, Result};
use clap::Args;
use software_dmv::output::print_license_info;

use super::{Project, required_parameters};

/// Arguments for the license command
#[derive(Args, Debug, Default)]
pub struct LicenseArgs {
  /// License to describe. Use the 'list' command to see all supported
  /// licenses.
  #[arg(value_name = "LICENSE")]
  pub license: String,

  /// Also print the full license text
  #[arg(long)]
  pub full: bool,

  /// Print the license as a JSON document (metadata plus fullText and
  /// headerText)
  #[arg(long, conflicts_with = "full")]
  pub json: bool,
}

/// Run the license command
pub fn run_license(project: &Project, args: LicenseArgs) -> Result<()> {
  let info = project
    .catalog
    .get_license_info(&args.license)
    .with_context(|| format!("Failed to load license '{}'", args.license))?;

  if args.json {
    let document = info.to_json().context("Failed to serialize license")?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    return Ok(());
  }

  let required = required_parameters(&info);
  print_license_info(&info, &required, &project.config, args.full);

  Ok(())
}
