//! # Settings Command
//!
//! Shows the project's license settings.

use anyhow::Result;
use clap::Args;
use software_dmv::output::print_settings;
use tracing::warn;

use super::{Project, required_parameters};

/// Arguments for the settings command. `-v` shows all settings and their
/// documentation.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {}

/// Run the settings command
pub fn run_settings(project: &Project, _args: SettingsArgs, verbose: bool) -> Result<()> {
  let required = match &project.config.license {
    Some(id) => match project.catalog.get_license_info(id) {
      Ok(info) => required_parameters(&info),
      Err(e) => {
        warn!("Configured license '{}' could not be loaded: {}", id, e);
        Vec::new()
      }
    },
    None => Vec::new(),
  };

  print_settings(
    &project.config,
    &project.config_path,
    &project.catalog.config().license_dir,
    &required,
    verbose,
  );

  Ok(())
}
