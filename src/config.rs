//! # Configuration Module
//!
//! Project configuration for software-dmv: which license the project uses,
//! the values filled into its placeholders, and where the license catalog
//! lives.
//!
//! Configuration is stored in `.software-dmv.toml` at the workspace root, or
//! wherever `--config` / the `SOFTWARE_DMV_CONFIG` environment variable points:
//!
//! ```toml
//! license = "mit"
//! license-dir = "Licenses"
//!
//! [LicenseParameters]
//! year = 2024
//! author = "Alice"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_LICENSE_DIR;
use crate::templates::ParameterSource;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".software-dmv.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "SOFTWARE_DMV_CONFIG";

/// Environment variable for specifying the license catalog directory.
pub const LICENSE_DIR_ENV_VAR: &str = "SOFTWARE_DMV_LICENSES";

/// The catalog shipped with the crate sources, used when the workspace has
/// none of its own.
pub const BUNDLED_LICENSE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/Licenses");

/// Settings shown by `settings --verbose`, with their documentation.
pub const SETTING_DOCS: &[(&str, &str)] = &[
  ("license", "Identifier of the license chosen for this project (see `list`)."),
  (
    "license-dir",
    "Directory holding the license catalog, relative to the workspace root. Defaults to `Licenses`.",
  ),
  (
    "LicenseParameters",
    "Values substituted for `{{ name }}` placeholders in license texts and headers.",
  ),
];

/// A single placeholder value.
///
/// TOML scalars are accepted as-is and rendered through [`fmt::Display`];
/// strings are rendered without quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
  Boolean(bool),
  Integer(i64),
  Float(f64),
  String(String),
}

impl fmt::Display for ParameterValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParameterValue::Boolean(b) => write!(f, "{b}"),
      ParameterValue::Integer(i) => write!(f, "{i}"),
      ParameterValue::Float(x) => write!(f, "{x}"),
      ParameterValue::String(s) => f.write_str(s),
    }
  }
}

impl From<&str> for ParameterValue {
  fn from(value: &str) -> Self {
    ParameterValue::String(value.to_string())
  }
}

impl From<String> for ParameterValue {
  fn from(value: String) -> Self {
    ParameterValue::String(value)
  }
}

/// The `LicenseParameters` table: placeholder name to value.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseParameters(BTreeMap<String, ParameterValue>);

impl LicenseParameters {
  pub fn get(&self, name: &str) -> Option<&ParameterValue> {
    self.0.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.0.contains_key(name)
  }

  /// Sets `name`, returning the previous value if there was one.
  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> Option<ParameterValue> {
    self.0.insert(name.into(), value.into())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl FromIterator<(String, ParameterValue)> for LicenseParameters {
  fn from_iter<I: IntoIterator<Item = (String, ParameterValue)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl ParameterSource for LicenseParameters {
  fn parameter(&self, name: &str) -> Option<String> {
    self.get(name).map(ToString::to_string)
  }
}

/// Main configuration struct for software-dmv.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
  /// The license chosen for the project.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub license: Option<String>,

  /// Catalog directory, relative to the workspace root unless absolute.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub license_dir: Option<PathBuf>,

  /// Placeholder values.
  #[serde(default, rename = "LicenseParameters")]
  pub license_parameters: LicenseParameters,
}

impl ParameterSource for Config {
  fn parameter(&self, name: &str) -> Option<String> {
    self.license_parameters.parameter(name)
  }
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// The config could not be rendered as TOML.
  #[error("Failed to serialize config: {0}")]
  SerializeError(#[from] toml::ser::Error),

  /// The config file could not be written.
  #[error("Failed to write config file '{path}': {source}")]
  WriteError { path: PathBuf, source: std::io::Error },

  /// A `--parameter` argument is not in `key:value` form.
  #[error("Invalid parameter '{arg}': {message}")]
  InvalidParameter { arg: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    verbose_log!("Loaded {} license parameters", config.license_parameters.len());

    Ok(config)
  }

  /// Write the configuration to `path`, replacing any previous content.
  pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string(self)?;

    std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
      path: path.to_path_buf(),
      source: e,
    })?;

    verbose_log!("Saved config to: {}", path.display());

    Ok(())
  }

  /// Merge parameters into this config. Later values win.
  pub fn merge_parameters<I>(&mut self, parameters: I)
  where
    I: IntoIterator<Item = (String, ParameterValue)>,
  {
    for (name, value) in parameters {
      if let Some(previous) = self.license_parameters.insert(name.clone(), value) {
        verbose_log!("Replacing parameter {} (was {})", name, previous);
      }
    }
  }

  /// Returns the names in `required` that have no value yet.
  pub fn missing_parameters<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
    required
      .iter()
      .filter(|name| !self.license_parameters.contains(name))
      .map(String::as_str)
      .collect()
  }
}

/// Parse `--parameter` arguments.
///
/// Every argument holds one or more comma-separated `key:value` pairs, e.g.
/// `project:foo,author:bar`. The value is everything after the first `:`, so
/// values may contain colons but not commas.
pub fn parse_parameter_args(args: &[String]) -> Result<Vec<(String, ParameterValue)>, ConfigError> {
  let mut parameters = Vec::new();

  for arg in args {
    for pair in arg.split(',') {
      let (key, value) = pair.split_once(':').ok_or_else(|| ConfigError::InvalidParameter {
        arg: pair.to_string(),
        message: "expected key:value".to_string(),
      })?;

      let key = key.trim();
      if key.is_empty() {
        return Err(ConfigError::InvalidParameter {
          arg: pair.to_string(),
          message: "parameter name cannot be empty".to_string(),
        });
      }

      parameters.push((key.to_string(), ParameterValue::from(value.trim())));
    }
  }

  Ok(parameters)
}

/// Determine the config file path.
///
/// In order of priority:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `SOFTWARE_DMV_CONFIG` environment variable
/// 3. `.software-dmv.toml` in the workspace root
///
/// The file does not need to exist; `choose` creates it.
pub fn config_path(explicit_path: Option<&Path>, workspace_root: &Path) -> PathBuf {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return path.to_path_buf();
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
    && !env_path.is_empty()
  {
    verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, env_path);
    return PathBuf::from(env_path);
  }

  workspace_root.join(DEFAULT_CONFIG_FILENAME)
}

/// Load the configuration at `path`, or a default configuration if the file
/// does not exist yet.
pub fn load_config(path: &Path) -> Result<Config> {
  if !path.exists() {
    verbose_log!("No config file at {}, using defaults", path.display());
    return Ok(Config::default());
  }

  Config::load(path).with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Determine the license catalog directory.
///
/// In order of priority: the `--license-dir` flag, the
/// `SOFTWARE_DMV_LICENSES` environment variable, `license-dir` from the
/// config, `Licenses` in the workspace root, and finally the catalog bundled
/// with the crate. Relative config values are resolved against the workspace
/// root.
pub fn resolve_license_dir(explicit_dir: Option<&Path>, config: &Config, workspace_root: &Path) -> PathBuf {
  if let Some(dir) = explicit_dir {
    return dir.to_path_buf();
  }

  if let Ok(env_dir) = std::env::var(LICENSE_DIR_ENV_VAR)
    && !env_dir.is_empty()
  {
    verbose_log!("Using license directory from {}: {}", LICENSE_DIR_ENV_VAR, env_dir);
    return PathBuf::from(env_dir);
  }

  match &config.license_dir {
    Some(dir) if dir.is_absolute() => dir.clone(),
    Some(dir) => workspace_root.join(dir),
    None => default_license_dir(workspace_root, Path::new(BUNDLED_LICENSE_DIR)),
  }
}

/// `Licenses` in the workspace root if present, else `bundled` if present.
///
/// When neither exists the workspace path is returned so the "not found"
/// error names the place users are expected to put a catalog.
fn default_license_dir(workspace_root: &Path, bundled: &Path) -> PathBuf {
  let local = workspace_root.join(DEFAULT_LICENSE_DIR);
  if !local.is_dir() && bundled.is_dir() {
    verbose_log!(
      "No {} in {}, using bundled catalog at {}",
      DEFAULT_LICENSE_DIR,
      workspace_root.display(),
      bundled.display()
    );
    return bundled.to_path_buf();
  }
  local
}
