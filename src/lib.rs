//! # software-dmv
//!
//! Pick an open-source license from a local catalog, fill in its parameters,
//! and put the license text and headers into your project.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use software_dmv::catalog::{CatalogConfig, LicenseCatalog};
//! use software_dmv::config::Config;
//! use software_dmv::templates::format_header;
//!
//! fn main() -> anyhow::Result<()> {
//!   let catalog = LicenseCatalog::new(CatalogConfig::new("Licenses"));
//!   let info = catalog.get_license_info("mit")?;
//!
//!   let mut config = Config::default();
//!   config.license_parameters.insert("year", "2024");
//!   config.license_parameters.insert("author", "Alice");
//!
//!   let header = format_header(&info.header_text, Path::new("src/lib.rs"), &config)?;
//!   println!("{header}");
//!
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`catalog`] - Listing and loading licenses from a license directory
//! * [`templates`] - Filling in `{{ name }}` placeholders and comment styles
//! * [`config`] - The project's `.software-dmv.toml`
//! * [`logging`] - Verbose/quiet output and tracing setup

pub mod catalog;
pub mod config;
pub mod git;
pub mod logging;
pub mod output;
pub mod templates;
pub mod workspace;
