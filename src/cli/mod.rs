//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing, with one subcommand per file.

mod choose;
mod header;
mod license;
mod list;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};
use software_dmv::catalog::{CatalogConfig, LicenseCatalog, LicenseInfo};
use software_dmv::config::{Config, config_path, load_config, resolve_license_dir};
use software_dmv::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use software_dmv::templates::placeholder_names;
use software_dmv::workspace::{Workspace, resolve_workspace};
use tracing::debug;

pub use self::choose::ChooseArgs;
pub use self::header::HeaderArgs;
pub use self::license::LicenseArgs;
pub use self::list::ListArgs;
pub use self::settings::SettingsArgs;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("GIT_HASH"),
  " ",
  env!("GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  long_version = LONG_VERSION,
  about = "Where you go to get your software license.",
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # List supported licenses
  software-dmv list

  # Describe a license and the parameters it needs
  software-dmv license mit

  # Choose a license, fill in its parameters and write LICENSE
  software-dmv choose mit -p author:Alice,project:foo

  # Only record the choice in .software-dmv.toml
  software-dmv choose apache-2.0 --no-apply

  # Show the current settings with documentation
  software-dmv settings -v

  # Print the license header for a source file
  software-dmv header src/main.rs
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,

  #[command(flatten)]
  pub global: GlobalArgs,
}

/// Arguments shared by every command.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
  /// Output more information about the executed command (-v info, -vv debug,
  /// -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Silence all non-error output
  #[arg(short, long, global = true, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    global = true,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Path to config file (default: .software-dmv.toml in the workspace root)
  #[arg(long, global = true, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Directory holding the license catalog (default: Licenses in the
  /// workspace root, else the catalog bundled with software-dmv)
  #[arg(long, global = true, value_name = "DIR")]
  pub license_dir: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Describe a license
  License(LicenseArgs),
  /// Choose a license to insert into your project
  Choose(ChooseArgs),
  /// List supported licenses
  List(ListArgs),
  /// Show current license settings for your project (-v for documentation)
  Settings(SettingsArgs),
  /// Print the license header for a file, commented for its file type
  Header(HeaderArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Everything a command needs to know about the project it runs in.
pub struct Project {
  pub workspace: Workspace,
  pub config_path: PathBuf,
  pub config: Config,
  pub catalog: LicenseCatalog,
}

impl Project {
  /// Resolve the workspace, load its config and locate the license catalog.
  pub fn open(global: &GlobalArgs) -> Result<Self> {
    let workspace = resolve_workspace()?;
    let root = workspace.root();
    debug!("Using workspace root: {}", root.display());

    let config_path = config_path(global.config.as_deref(), root);
    let config = load_config(&config_path)?;

    let license_dir = resolve_license_dir(global.license_dir.as_deref(), &config, root);
    debug!("Using license directory: {}", license_dir.display());
    let catalog = LicenseCatalog::new(CatalogConfig::new(license_dir));

    Ok(Self {
      workspace,
      config_path,
      config,
      catalog,
    })
  }
}

/// Run the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
  let global = cli.global;

  init_tracing(global.quiet, global.verbose);

  if global.verbose > 0 {
    set_verbose();
  } else if global.quiet {
    set_quiet();
  }
  global.colors.apply();

  let mut project = Project::open(&global)?;

  match cli.command {
    Command::License(args) => license::run_license(&project, args),
    Command::Choose(args) => choose::run_choose(&mut project, args),
    Command::List(args) => list::run_list(&project, args),
    Command::Settings(args) => settings::run_settings(&project, args, global.verbose > 0),
    Command::Header(args) => header::run_header(&project, args),
  }
}

/// Placeholders used anywhere in a license: header first, then full text.
pub fn required_parameters(info: &LicenseInfo) -> Vec<String> {
  let mut names = placeholder_names(&info.header_text);
  for name in placeholder_names(&info.full_text) {
    if !names.contains(&name) {
      names.push(name);
    }
  }
  names
}
