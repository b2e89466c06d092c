//! # Choose Command
//!
//! Records the project's license and its parameters in the config file and,
//! unless `--no-apply` is given, writes the filled-in license text to
//! `LICENSE` in the workspace root.

use anyhow::{Context, Result, bail};
use chrono::Datelike;
use clap::Args;
use software_dmv::config::{ParameterValue, parse_parameter_args};
use software_dmv::info_log;
use software_dmv::output::{print_hint, print_success};
use software_dmv::templates::{format_header, placeholder_names};
use tracing::debug;

use super::{Project, required_parameters};

/// File the license text is written to, relative to the workspace root.
pub const LICENSE_FILENAME: &str = "LICENSE";

/// Arguments for the choose command
#[derive(Args, Debug, Default)]
pub struct ChooseArgs {
  /// License to be created for your project. Use the 'list' command to see
  /// all supported licenses.
  #[arg(value_name = "LICENSE")]
  pub license: String,

  /// Write/update config file, but do not apply license to project
  #[arg(long)]
  pub no_apply: bool,

  /// Set a license parameter. Input is in key:value form and multiple
  /// parameters can be set by using multiple flags or by concatenating
  /// key-value pairs with commas, e.g. '--parameter=project:foo,author:bar'.
  #[arg(short, long = "parameter", value_name = "KEY:VALUE")]
  pub parameters: Vec<String>,
}

/// Run the choose command
pub fn run_choose(project: &mut Project, args: ChooseArgs) -> Result<()> {
  let info = project
    .catalog
    .get_license_info(&args.license)
    .with_context(|| format!("Failed to load license '{}'", args.license))?;

  let parameters = parse_parameter_args(&args.parameters)?;

  let config = &mut project.config;
  if config.license.as_deref() != Some(info.id.as_str()) {
    debug!("Switching license from {:?} to {}", config.license, info.id);
  }
  config.license = Some(info.id.clone());
  config.merge_parameters(parameters);

  let required = required_parameters(&info);
  if required.iter().any(|name| name == "year") && !config.license_parameters.contains("year") {
    let year = chrono::Local::now().year();
    debug!("Defaulting year parameter to {}", year);
    config
      .license_parameters
      .insert("year", ParameterValue::Integer(i64::from(year)));
  }

  config
    .save(&project.config_path)
    .with_context(|| format!("Failed to save settings to {}", project.config_path.display()))?;
  print_success(&format!(
    "Chose {} (settings saved to {})",
    info.id,
    project.config_path.display()
  ));

  let missing = config.missing_parameters(&required);

  if args.no_apply {
    if !missing.is_empty() {
      print_hint(&format!("Parameters still needed: {}", missing.join(", ")));
    }
    return Ok(());
  }

  // Only the full text goes into LICENSE; header parameters can wait.
  let text_parameters = placeholder_names(&info.full_text);
  let blocking = config.missing_parameters(&text_parameters);
  if !blocking.is_empty() {
    bail!(
      "Cannot apply {}: missing parameters {}. Set them with `software-dmv choose {} -p {}:<value>`.",
      info.id,
      blocking.join(", "),
      info.id,
      blocking[0]
    );
  }

  if !missing.is_empty() {
    print_hint(&format!("Parameters still needed for headers: {}", missing.join(", ")));
  }

  let license_path = project.workspace.root().join(LICENSE_FILENAME);
  let text = format_header(&info.full_text, &license_path, &*config)
    .with_context(|| format!("Failed to fill in the text of '{}'", info.id))?;

  std::fs::write(&license_path, text).with_context(|| format!("Failed to write {}", license_path.display()))?;
  info_log!("Wrote {}", license_path.display());

  Ok(())
}
