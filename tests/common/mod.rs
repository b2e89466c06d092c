#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

pub const MIT_TEXT: &str = "MIT License

Copyright (c) {{ year }} {{ author }}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\").
";

pub const MIT_HEADER: &str = "Copyright (c) {{ year }} {{ author }}
SPDX-License-Identifier: MIT
";

pub const ISC_TEXT: &str = "ISC License

Copyright {{ year }} {{ author }}

Permission to use, copy, modify, and/or distribute this software for any
purpose with or without fee is hereby granted.
";

pub const UNLICENSE_TEXT: &str = "This is free and unencumbered software released into the public domain.
";

pub const GENERIC_HEADER: &str = "Copyright (c) {{ year }} {{ author }}
All rights reserved.
";

/// A temporary project with a git repository and a small license catalog
/// under `Licenses/`.
pub struct TestProject {
  pub dir: TempDir,
}

impl TestProject {
  pub fn new() -> Result<Self> {
    let dir = TempDir::new()?;
    git2::Repository::init(dir.path()).context("Failed to init git repository")?;

    let project = Self { dir };
    project.write_license("mit.txt", MIT_TEXT)?;
    project.write_license(
      "mit.json",
      r#"{"name": "MIT License", "spdxId": "MIT", "url": "https://opensource.org/licenses/MIT", "osiApproved": true}"#,
    )?;
    project.write_license("mit_header.txt", MIT_HEADER)?;
    project.write_license("isc.txt", ISC_TEXT)?;
    project.write_license("isc.json", r#"{"name": "ISC License", "spdxId": "ISC"}"#)?;
    project.write_license("unlicense.txt", UNLICENSE_TEXT)?;
    project.write_license("unlicense.json", r#"{"name": "The Unlicense"}"#)?;
    project.write_license("generic_header.txt", GENERIC_HEADER)?;

    Ok(project)
  }

  pub fn path(&self) -> &Path {
    self.dir.path()
  }

  pub fn license_dir(&self) -> PathBuf {
    self.path().join("Licenses")
  }

  pub fn write_license(&self, name: &str, content: &str) -> Result<()> {
    let path = self.license_dir().join(name);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
  }

  pub fn config_path(&self) -> PathBuf {
    self.path().join(".software-dmv.toml")
  }

  pub fn read(&self, name: &str) -> Result<String> {
    let path = self.path().join(name);
    fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
  }
}
