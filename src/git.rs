//! # Git Module
//!
//! Locates the git repository a project lives in.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{ErrorCode, Repository};

use crate::verbose_log;

/// Returns the working directory root of the git repository containing
/// `start`, or `None` if `start` is not inside a repository.
///
/// # Errors
///
/// Returns an error if a repository is found but cannot be opened, or if it is
/// a bare repository without a working directory.
pub fn discover_repo_root(start: &Path) -> Result<Option<PathBuf>> {
  let repo = match Repository::discover(start) {
    Ok(repo) => repo,
    Err(e) if e.code() == ErrorCode::NotFound => {
      verbose_log!("No git repository found from: {}", start.display());
      return Ok(None);
    }
    Err(e) => {
      return Err(e).with_context(|| format!("Failed to open git repository from {}", start.display()));
    }
  };

  let root = repo
    .workdir()
    .with_context(|| format!("Git repository at {} has no working directory", repo.path().display()))?
    .to_path_buf();

  verbose_log!("Found git repository at: {}", root.display());

  Ok(Some(root))
}
