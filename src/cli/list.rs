//! # List Command
//!
//! Prints the identifiers of every license in the catalog.

use anyhow::{Context, Result};
use clap::Args;
use software_dmv::output::print_license_list;

use super::Project;

/// Arguments for the list command
#[derive(Args, Debug, Default)]
pub struct ListArgs {}

/// Run the list command
pub fn run_list(project: &Project, _args: ListArgs) -> Result<()> {
  let licenses = project.catalog.get_license_list().with_context(|| {
    format!(
      "Failed to list licenses in {}",
      project.catalog.config().license_dir.display()
    )
  })?;

  print_license_list(&licenses, project.config.license.as_deref());

  Ok(())
}
