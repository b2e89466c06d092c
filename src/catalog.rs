//! # Catalog Module
//!
//! This module reads the license catalog: a directory of license files where
//! every license `<id>` is made of
//!
//! - `<id>.txt`, the full license text,
//! - `<id>.json`, a metadata sidecar (a JSON object),
//! - `<id>_header.txt`, an optional header template to prepend to source
//!   files.
//!
//! A license without its own header borrows the header of the default
//! license (`generic` unless configured otherwise). Licenses may live in
//! subdirectories, in which case their identifier is the `/`-joined relative
//! path, e.g. `gnu/gpl-3.0`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use software_dmv::catalog::{CatalogConfig, LicenseCatalog};
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = LicenseCatalog::new(CatalogConfig::new("Licenses"));
//!
//! for id in catalog.get_license_list()? {
//!   let info = catalog.get_license_info(&id)?;
//!   println!("{id}: {}", info.metadata.name.as_deref().unwrap_or("?"));
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use walkdir::WalkDir;

/// Directory searched for licenses when nothing else is configured.
pub const DEFAULT_LICENSE_DIR: &str = "Licenses";

/// License whose header is used when a license has no header of its own.
pub const DEFAULT_LICENSE: &str = "generic";

/// Extension of license text and header files.
pub const LICENSE_EXT: &str = "txt";

/// Extension of metadata sidecars.
pub const METADATA_EXT: &str = "json";

/// Suffix that marks a header file, placed before the extension.
pub const LICENSE_HEADER_SUFFIX: &str = "_header";

/// Keys the loader fills in itself. Values for them in a sidecar are dropped.
const RESERVED_KEYS: [&str; 2] = ["fullText", "headerText"];

/// Where a catalog lives and how its files are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
  /// Root directory of the catalog.
  pub license_dir: PathBuf,
  /// License providing the fallback header.
  pub default_license: String,
  /// Extension of text and header files, without the leading dot.
  pub text_ext: String,
  /// Extension of metadata sidecars, without the leading dot.
  pub metadata_ext: String,
  /// Suffix distinguishing `<id><suffix>.<text_ext>` header files.
  pub header_suffix: String,
}

impl Default for CatalogConfig {
  fn default() -> Self {
    Self {
      license_dir: PathBuf::from(DEFAULT_LICENSE_DIR),
      default_license: DEFAULT_LICENSE.to_string(),
      text_ext: LICENSE_EXT.to_string(),
      metadata_ext: METADATA_EXT.to_string(),
      header_suffix: LICENSE_HEADER_SUFFIX.to_string(),
    }
  }
}

impl CatalogConfig {
  /// Default naming conventions rooted at `license_dir`.
  pub fn new(license_dir: impl Into<PathBuf>) -> Self {
    Self {
      license_dir: license_dir.into(),
      ..Self::default()
    }
  }
}

/// Error type for catalog lookups.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  /// The catalog directory itself does not exist.
  #[error("License directory not found: {}", path.display())]
  CatalogNotFound { path: PathBuf },

  /// A file the license needs does not exist.
  #[error("License '{id}' not found: missing {}", path.display())]
  NotFound { id: String, path: PathBuf },

  /// The metadata sidecar exists but is not a valid JSON object.
  #[error("Malformed metadata for license '{id}' in {}: {source}", path.display())]
  MalformedMetadata {
    id: String,
    path: PathBuf,
    source: serde_json::Error,
  },

  /// The identifier would resolve outside the catalog directory.
  #[error("Invalid license identifier '{id}'")]
  InvalidIdentifier { id: String },

  /// Any other filesystem failure.
  #[error("Failed to read {}: {source}", path.display())]
  Io { path: PathBuf, source: io::Error },
}

/// Metadata sidecar of a license.
///
/// The commonly used fields are typed; every other key is kept in `extra` so
/// that serializing the record writes it back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseMetadata {
  /// Human readable name, e.g. "MIT License".
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,

  /// SPDX identifier, e.g. "MIT".
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub spdx_id: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,

  /// Keys this crate does not interpret.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Everything known about one license.
///
/// Serializes to the sidecar's fields plus `fullText` and `headerText`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
  #[serde(skip)]
  pub id: String,

  #[serde(flatten)]
  pub metadata: LicenseMetadata,

  pub full_text: String,

  /// The license's own header, or the default license's header.
  pub header_text: String,
}

impl LicenseInfo {
  /// The merged mapping: metadata fields plus `fullText` and `headerText`.
  pub fn to_json(&self) -> serde_json::Result<Value> {
    serde_json::to_value(self)
  }
}

/// Read-only view of a license directory.
#[derive(Debug, Clone)]
pub struct LicenseCatalog {
  config: CatalogConfig,
}

impl LicenseCatalog {
  pub const fn new(config: CatalogConfig) -> Self {
    Self { config }
  }

  pub const fn config(&self) -> &CatalogConfig {
    &self.config
  }

  /// Lists the identifiers of every license in the catalog, sorted and
  /// without duplicates.
  ///
  /// The directory tree is walked; text, header and metadata files of the
  /// same license collapse to one identifier. Only licenses that have both a
  /// text file and a metadata file are listed, so every returned identifier
  /// can be passed to [`get_license_info`](Self::get_license_info). Files with
  /// other extensions are ignored. Symlinks are followed.
  pub fn get_license_list(&self) -> Result<Vec<String>, CatalogError> {
    let root = &self.config.license_dir;
    if !root.is_dir() {
      return Err(CatalogError::CatalogNotFound { path: root.clone() });
    }

    let mut texts = BTreeSet::new();
    let mut sidecars = BTreeSet::new();

    for entry in WalkDir::new(root).min_depth(1).follow_links(true).sort_by_file_name() {
      let entry = entry.map_err(|e| CatalogError::Io {
        path: e.path().map_or_else(|| root.clone(), Path::to_path_buf),
        source: io::Error::from(e),
      })?;

      if !entry.file_type().is_file() {
        continue;
      }

      let Ok(relative) = entry.path().strip_prefix(root) else {
        continue;
      };
      let Some(extension) = relative.extension().and_then(|ext| ext.to_str()) else {
        continue;
      };
      let Some(stem) = identifier_from_path(&relative.with_extension("")) else {
        debug!(path = %entry.path().display(), "Skipping file with non UTF-8 name");
        continue;
      };

      // A header file only lists if it also has a sidecar of its own, so
      // `mit_header.txt` never shows up next to `mit`.
      if extension == self.config.text_ext {
        texts.insert(stem);
      } else if extension == self.config.metadata_ext {
        sidecars.insert(stem);
      }
    }

    let licenses: Vec<String> = texts.intersection(&sidecars).cloned().collect();
    debug!(count = licenses.len(), dir = %root.display(), "Listed licenses");

    Ok(licenses)
  }

  /// Loads the full text, header and metadata of license `id`.
  ///
  /// When the license has no header file the default license's header is
  /// used instead; only a missing default header is an error then.
  pub fn get_license_info(&self, id: &str) -> Result<LicenseInfo, CatalogError> {
    validate_identifier(id)?;

    let full_text = read_required(id, &self.text_path(id))?;

    let metadata_path = self.metadata_path(id);
    let raw_metadata = read_required(id, &metadata_path)?;
    let mut metadata: LicenseMetadata =
      serde_json::from_str(&raw_metadata).map_err(|source| CatalogError::MalformedMetadata {
        id: id.to_string(),
        path: metadata_path.clone(),
        source,
      })?;
    for key in RESERVED_KEYS {
      metadata.extra.remove(key);
    }

    let header_text = match read_optional(&self.header_path(id))? {
      Some(header) => header,
      None => {
        let default = &self.config.default_license;
        debug!(license = id, fallback = %default, "No header file, using default header");
        read_required(default, &self.header_path(default))?
      }
    };

    Ok(LicenseInfo {
      id: id.to_string(),
      metadata,
      full_text,
      header_text,
    })
  }

  /// Path of the full text of license `id`.
  pub fn text_path(&self, id: &str) -> PathBuf {
    self
      .config
      .license_dir
      .join(format!("{id}.{}", self.config.text_ext))
  }

  /// Path of the metadata sidecar of license `id`.
  pub fn metadata_path(&self, id: &str) -> PathBuf {
    self
      .config
      .license_dir
      .join(format!("{id}.{}", self.config.metadata_ext))
  }

  /// Path of the dedicated header of license `id`, whether or not it exists.
  pub fn header_path(&self, id: &str) -> PathBuf {
    self
      .config
      .license_dir
      .join(format!("{id}{}.{}", self.config.header_suffix, self.config.text_ext))
  }
}

/// Joins the components of a relative path with `/`.
fn identifier_from_path(path: &Path) -> Option<String> {
  let parts: Option<Vec<&str>> = path.components().map(|c| c.as_os_str().to_str()).collect();
  parts.map(|parts| parts.join("/"))
}

fn validate_identifier(id: &str) -> Result<(), CatalogError> {
  let path = Path::new(id);
  let is_plain = !id.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)));
  if is_plain {
    Ok(())
  } else {
    Err(CatalogError::InvalidIdentifier { id: id.to_string() })
  }
}

fn read_required(id: &str, path: &Path) -> Result<String, CatalogError> {
  read_optional(path)?.ok_or_else(|| CatalogError::NotFound {
    id: id.to_string(),
    path: path.to_path_buf(),
  })
}

fn read_optional(path: &Path) -> Result<Option<String>, CatalogError> {
  match std::fs::read_to_string(path) {
    Ok(content) => Ok(Some(content)),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(source) => Err(CatalogError::Io {
      path: path.to_path_buf(),
      source,
    }),
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  fn catalog_with(files: &[(&str, &str)]) -> (TempDir, LicenseCatalog) {
    let temp_dir = TempDir::new().expect("create temp dir");
    for (name, content) in files {
      let path = temp_dir.path().join(name);
      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
      }
      fs::write(&path, content).expect("write license file");
    }
    let catalog = LicenseCatalog::new(CatalogConfig::new(temp_dir.path()));
    (temp_dir, catalog)
  }

  #[test]
  fn test_list_collapses_header_variants() {
    let (_dir, catalog) = catalog_with(&[
      ("mit.txt", "MIT text"),
      ("mit.json", "{}"),
      ("mit_header.txt", "MIT header"),
    ]);

    assert_eq!(catalog.get_license_list().expect("list"), vec!["mit"]);
  }

  #[test]
  fn test_list_is_sorted_and_ignores_other_files() {
    let (_dir, catalog) = catalog_with(&[
      ("zlib.txt", "z"),
      ("zlib.json", "{}"),
      ("apache-2.0.txt", "a"),
      ("apache-2.0.json", "{}"),
      ("generic_header.txt", "Copyright {{ year }}"),
      ("README.md", "catalog readme"),
      ("orphan.txt", "no sidecar"),
    ]);

    assert_eq!(
      catalog.get_license_list().expect("list"),
      vec!["apache-2.0", "zlib"]
    );
  }

  #[test]
  fn test_list_does_not_trim_name_characters() {
    // A name ending in letters of the suffix must survive intact.
    let (_dir, catalog) = catalog_with(&[("header.txt", "h"), ("header.json", "{}")]);

    assert_eq!(catalog.get_license_list().expect("list"), vec!["header"]);
  }

  #[test]
  fn test_list_includes_license_named_like_a_header() {
    let (_dir, catalog) = catalog_with(&[
      ("x_header.txt", "x text"),
      ("x_header.json", "{}"),
      ("generic_header.txt", "generic"),
    ]);

    assert_eq!(catalog.get_license_list().expect("list"), vec!["x_header"]);
    assert!(catalog.get_license_info("x_header").is_ok());
  }

  #[test]
  fn test_list_ignores_sidecar_of_a_header() {
    // `mit_header.json` describes no license on its own and must not stand
    // in for `mit.json`.
    let (_dir, catalog) = catalog_with(&[("mit.txt", "MIT text"), ("mit_header.json", "{}")]);

    assert!(catalog.get_license_list().expect("list").is_empty());
  }

  #[cfg(unix)]
  #[test]
  fn test_list_follows_symlinked_files() {
    let (dir, catalog) = catalog_with(&[
      ("real/mit.txt", "MIT text"),
      ("real/mit.json", "{}"),
      ("generic_header.txt", "generic header"),
    ]);
    let link = |target: &str, name: &str| {
      std::os::unix::fs::symlink(dir.path().join(target), dir.path().join(name)).expect("create symlink");
    };
    link("real/mit.txt", "expat.txt");
    link("real/mit.json", "expat.json");

    let listed = catalog.get_license_list().expect("list");
    assert_eq!(listed, vec!["expat", "real/mit"]);
    for id in &listed {
      assert!(catalog.get_license_info(id).is_ok(), "{id} should resolve");
    }
  }

  #[test]
  fn test_list_nested_directories() {
    let (_dir, catalog) = catalog_with(&[
      ("gnu/gpl-3.0.txt", "GPL"),
      ("gnu/gpl-3.0.json", "{}"),
      ("gnu/gpl-3.0_header.txt", "GPL header"),
    ]);

    let list = catalog.get_license_list().expect("list");
    assert_eq!(list, vec!["gnu/gpl-3.0"]);

    let info = catalog.get_license_info("gnu/gpl-3.0").expect("info");
    assert_eq!(info.header_text, "GPL header");
  }

  #[test]
  fn test_every_listed_license_resolves() {
    let (_dir, catalog) = catalog_with(&[
      ("mit.txt", "MIT"),
      ("mit.json", "{\"name\": \"MIT License\"}"),
      ("bsd.txt", "BSD"),
      ("bsd.json", "{}"),
      ("bsd_header.txt", "BSD header"),
      ("generic_header.txt", "generic header"),
    ]);

    for id in catalog.get_license_list().expect("list") {
      assert!(catalog.get_license_info(&id).is_ok(), "{id} should resolve");
    }
  }

  #[test]
  fn test_list_missing_directory() {
    let catalog = LicenseCatalog::new(CatalogConfig::new("/nonexistent/licenses"));
    assert!(matches!(
      catalog.get_license_list(),
      Err(CatalogError::CatalogNotFound { .. })
    ));
  }

  #[test]
  fn test_info_merges_texts_and_metadata() {
    let (_dir, catalog) = catalog_with(&[
      ("mit.txt", "Permission is hereby granted"),
      (
        "mit.json",
        r#"{"name": "MIT License", "spdxId": "MIT", "osiApproved": true, "tags": ["permissive"]}"#,
      ),
      ("mit_header.txt", "Copyright {{ year }} {{ author }}"),
    ]);

    let info = catalog.get_license_info("mit").expect("info");
    assert_eq!(info.id, "mit");
    assert_eq!(info.full_text, "Permission is hereby granted");
    assert_eq!(info.header_text, "Copyright {{ year }} {{ author }}");
    assert_eq!(info.metadata.name.as_deref(), Some("MIT License"));
    assert_eq!(info.metadata.spdx_id.as_deref(), Some("MIT"));

    let json = info.to_json().expect("serialize");
    assert_eq!(json["name"], "MIT License");
    assert_eq!(json["spdxId"], "MIT");
    assert_eq!(json["osiApproved"], true);
    assert_eq!(json["tags"][0], "permissive");
    assert_eq!(json["fullText"], "Permission is hereby granted");
    assert_eq!(json["headerText"], "Copyright {{ year }} {{ author }}");
  }

  #[test]
  fn test_info_loader_owns_reserved_keys() {
    let (_dir, catalog) = catalog_with(&[
      ("mit.txt", "real text"),
      ("mit.json", r#"{"fullText": "stale", "headerText": "stale"}"#),
      ("mit_header.txt", "real header"),
    ]);

    let info = catalog.get_license_info("mit").expect("info");
    assert!(info.metadata.extra.is_empty());

    let json = info.to_json().expect("serialize");
    assert_eq!(json["fullText"], "real text");
    assert_eq!(json["headerText"], "real header");
  }

  #[test]
  fn test_info_falls_back_to_default_header() {
    let (_dir, catalog) = catalog_with(&[
      ("isc.txt", "ISC text"),
      ("isc.json", "{}"),
      ("generic_header.txt", "Copyright (c) {{ year }} {{ author }}\n"),
    ]);

    let info = catalog.get_license_info("isc").expect("info");
    assert_eq!(info.header_text, "Copyright (c) {{ year }} {{ author }}\n");
  }

  #[test]
  fn test_info_uses_configured_default_license() {
    let temp_dir = TempDir::new().expect("create temp dir");
    fs::write(temp_dir.path().join("isc.txt"), "ISC").expect("write");
    fs::write(temp_dir.path().join("isc.json"), "{}").expect("write");
    fs::write(temp_dir.path().join("plain_header.txt"), "plain header").expect("write");

    let config = CatalogConfig {
      default_license: "plain".to_string(),
      ..CatalogConfig::new(temp_dir.path())
    };
    let info = LicenseCatalog::new(config).get_license_info("isc").expect("info");
    assert_eq!(info.header_text, "plain header");
  }

  #[test]
  fn test_info_missing_default_header_is_not_found() {
    let (_dir, catalog) = catalog_with(&[("isc.txt", "ISC"), ("isc.json", "{}")]);

    match catalog.get_license_info("isc") {
      Err(CatalogError::NotFound { id, .. }) => assert_eq!(id, "generic"),
      other => panic!("expected NotFound, got {other:?}"),
    }
  }

  #[test]
  fn test_info_missing_text_is_not_found() {
    let (_dir, catalog) = catalog_with(&[("mit.json", "{}")]);
    assert!(matches!(
      catalog.get_license_info("mit"),
      Err(CatalogError::NotFound { .. })
    ));
  }

  #[test]
  fn test_info_missing_metadata_is_not_found() {
    let (_dir, catalog) = catalog_with(&[("mit.txt", "MIT")]);
    match catalog.get_license_info("mit") {
      Err(CatalogError::NotFound { path, .. }) => assert!(path.ends_with("mit.json")),
      other => panic!("expected NotFound, got {other:?}"),
    }
  }

  #[test]
  fn test_info_malformed_metadata() {
    let (_dir, catalog) = catalog_with(&[("mit.txt", "MIT"), ("mit.json", "{ not json")]);
    assert!(matches!(
      catalog.get_license_info("mit"),
      Err(CatalogError::MalformedMetadata { .. })
    ));

    let (_dir, catalog) = catalog_with(&[("mit.txt", "MIT"), ("mit.json", "[1, 2, 3]")]);
    assert!(matches!(
      catalog.get_license_info("mit"),
      Err(CatalogError::MalformedMetadata { .. })
    ));
  }

  #[test]
  fn test_info_rejects_escaping_identifiers() {
    let (_dir, catalog) = catalog_with(&[]);
    for id in ["", "../secret", "/etc/passwd", "a/../../b"] {
      assert!(
        matches!(catalog.get_license_info(id), Err(CatalogError::InvalidIdentifier { .. })),
        "{id:?} should be rejected"
      );
    }
  }
}
