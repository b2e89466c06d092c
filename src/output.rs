//! # Output Module
//!
//! This module centralizes all user-facing output for software-dmv.
//!
//! ## Design Goals
//!
//! - **Scannable**: headings and symbols make output easy to read at a glance
//! - **Progressive**: more detail with `-v`, silence with `-q`
//! - **Scriptable**: in quiet mode `list` prints bare identifiers, and the
//!   `header` command always writes only the header to stdout

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::catalog::LicenseInfo;
use crate::config::{Config, SETTING_DOCS};
use crate::logging::{is_quiet, is_verbose};

/// Symbols used in output
pub mod symbols {
  /// Success / parameter present
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing parameter / failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Currently selected license
  pub const CURRENT: &str = "*";
}

/// Print the identifiers of all licenses, marking the one the project uses.
pub fn print_license_list(licenses: &[String], current: Option<&str>) {
  if is_quiet() {
    for id in licenses {
      println!("{id}");
    }
    return;
  }

  if licenses.is_empty() {
    println!("No licenses found.");
    return;
  }

  let count = licenses.len();
  println!(
    "{} supported {}:",
    count,
    if count == 1 { "license" } else { "licenses" }
  );

  for id in licenses {
    if current == Some(id.as_str()) {
      println!(
        "{} {}",
        symbols::CURRENT.if_supports_color(Stream::Stdout, |s| s.green()),
        id.if_supports_color(Stream::Stdout, |s| s.bold())
      );
    } else {
      println!("  {id}");
    }
  }
}

/// Print a description of a license.
///
/// `required` lists the placeholders the license needs; each is marked by
/// whether `config` provides it. The full text is only printed with `full`.
pub fn print_license_info(info: &LicenseInfo, required: &[String], config: &Config, full: bool) {
  let title = info.metadata.name.as_deref().unwrap_or(&info.id);
  println!("{}", title.if_supports_color(Stream::Stdout, |s| s.bold()));

  print_field("identifier", &info.id);
  if let Some(spdx_id) = &info.metadata.spdx_id {
    print_field("spdx", spdx_id);
  }
  if let Some(url) = &info.metadata.url {
    print_field("url", url);
  }
  if let Some(description) = &info.metadata.description {
    print_field("description", description);
  }
  if is_verbose() {
    for (key, value) in &info.metadata.extra {
      print_field(key, &value.to_string());
    }
  }

  if !required.is_empty() {
    print_blank_line();
    println!("Parameters:");
    print_parameter_status(required, config);
  }

  print_blank_line();
  println!("Header:");
  print_indented(&info.header_text);

  if full {
    print_blank_line();
    println!("Full text:");
    print_indented(&info.full_text);
  }
}

/// Print the current settings.
///
/// The default view lists the configured values; `verbose` adds the
/// documentation of every setting and the parameters the chosen license still
/// needs.
pub fn print_settings(config: &Config, config_path: &Path, license_dir: &Path, required: &[String], verbose: bool) {
  let exists = config_path.exists();
  println!(
    "Config file: {}{}",
    config_path.display(),
    if exists { "" } else { " (not created yet)" }
  );
  print_blank_line();

  let license = config.license.as_deref().unwrap_or("<none>");
  let license_dir = license_dir.display().to_string();

  for (name, doc) in SETTING_DOCS {
    match *name {
      "license" => print_field(name, license),
      "license-dir" => print_field(name, &license_dir),
      _ => {
        println!("{name}:");
        if config.license_parameters.is_empty() {
          println!("  <none>");
        }
        for (key, value) in config.license_parameters.iter() {
          println!("  {key} = {value}");
        }
      }
    }
    if verbose {
      println!("    {}", doc.if_supports_color(Stream::Stdout, |s| s.dimmed()));
    }
  }

  if verbose && !required.is_empty() {
    print_blank_line();
    println!("Parameters used by {license}:");
    print_parameter_status(required, config);
  }
}

/// Print a one-line success message.
pub fn print_success(message: &str) {
  if is_quiet() {
    return;
  }

  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

/// Print a hint message in yellow.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

fn print_parameter_status(required: &[String], config: &Config) {
  for name in required {
    match config.license_parameters.get(name) {
      Some(value) => println!(
        "  {} {} = {}",
        symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
        name,
        value
      ),
      None => println!(
        "  {} {} (not set)",
        symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
        name
      ),
    }
  }
}

fn print_field(name: &str, value: &str) {
  println!("{}: {}", name.if_supports_color(Stream::Stdout, |s| s.cyan()), value);
}

fn print_indented(text: &str) {
  print!("{}", indent(text, "  "));
}

/// Prefix every non-empty line of `text` with `prefix`.
fn indent(text: &str, prefix: &str) -> String {
  let mut result = String::with_capacity(text.len());
  for line in text.lines() {
    if !line.is_empty() {
      result.push_str(prefix);
      result.push_str(line);
    }
    result.push('\n');
  }
  result
}
