//! # Workspace Module
//!
//! This module defines the project root that software-dmv reads its config
//! from and writes `LICENSE` into.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::git;

/// Workspace root selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Workspace {
  /// Workspace rooted at a git repository.
  Git { root: PathBuf },
  /// Workspace rooted at a plain directory.
  Directory { root: PathBuf },
}

impl Workspace {
  pub fn root(&self) -> &Path {
    match self {
      Self::Git { root } | Self::Directory { root } => root.as_path(),
    }
  }

  pub const fn is_git(&self) -> bool {
    matches!(self, Self::Git { .. })
  }
}

/// Resolve the workspace for the current directory.
pub fn resolve_workspace() -> Result<Workspace> {
  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  resolve_workspace_from(&current_dir)
}

/// Resolve the workspace for `dir`: the enclosing git repository if there is
/// one, `dir` itself otherwise.
pub fn resolve_workspace_from(dir: &Path) -> Result<Workspace> {
  if let Some(root) = git::discover_repo_root(dir)? {
    return Ok(Workspace::Git { root });
  }

  Ok(Workspace::Directory { root: dir.to_path_buf() })
}
