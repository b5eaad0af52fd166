//! Workspace root discovery

use env_run_core::{Error, Result, WORKSPACE_MARKER};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Walk up from `start` until a directory containing the workspace marker file is found
pub fn find_workspace_root(start: &Path) -> Result<PathBuf> {
    find_marker_ancestor(start, WORKSPACE_MARKER)
}

fn find_marker_ancestor(start: &Path, marker: &str) -> Result<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).exists())
        .map(|dir| {
            debug!("Found workspace root at {}", dir.display());
            dir.to_path_buf()
        })
        .ok_or_else(|| {
            Error::configuration(format!("Could not find monorepo root containing {marker}"))
        })
}

/// Resolve the workspace root, preferring an explicitly configured directory
pub fn resolve_workspace_root(explicit: Option<&Path>, current_dir: &Path) -> Result<PathBuf> {
    match explicit {
        Some(root) if root.is_dir() => Ok(root.to_path_buf()),
        Some(root) => Err(Error::configuration(format!(
            "Configured workspace root '{}' is not a directory",
            root.display()
        ))),
        None => find_workspace_root(current_dir),
    }
}
