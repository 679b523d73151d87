//! Workspace staging — a disposable per-record copy of the template directory.
//!
//! Substitution and compilation only ever touch the copy; the template
//! directory itself stays byte-for-byte intact across the whole run. At most
//! one workspace exists at a time: [`stage`] removes any previous one before
//! copying.

use std::fs::DirEntry;
use std::path::Path;

use crate::error::{io_err, BatchError};

// ---------------------------------------------------------------------------
// Staging
// ---------------------------------------------------------------------------

/// Create `workspace_dir` as a fresh copy of `template_dir`.
///
/// Any workspace left behind by a previous record (or an interrupted run) is
/// removed first, so stale rendered files never leak into the next record.
pub fn stage(template_dir: &Path, workspace_dir: &Path) -> Result<(), BatchError> {
    if workspace_dir == template_dir {
        return Err(BatchError::WorkspaceCollision {
            path: workspace_dir.to_path_buf(),
        });
    }
    teardown(workspace_dir)?;
    copy_tree(template_dir, workspace_dir)
}

/// Remove `workspace_dir` and everything under it. Missing is fine.
pub fn teardown(workspace_dir: &Path) -> Result<(), BatchError> {
    match std::fs::remove_dir_all(workspace_dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_err(workspace_dir, e)),
    }
}

// ---------------------------------------------------------------------------
// Directory copy
// ---------------------------------------------------------------------------

/// Directory entries sorted by file name, for deterministic processing.
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<DirEntry>, BatchError> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| io_err(dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<(), BatchError> {
    // Listing before creating `dst` keeps a workspace nested inside the
    // template directory from being copied into itself.
    let entries = sorted_entries(src)?;
    std::fs::create_dir_all(dst).map_err(|e| io_err(dst, e))?;
    for entry in entries {
        let path = entry.path();
        let target = dst.join(entry.file_name());
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            copy_tree(&path, &target)?;
        } else if meta.is_file() {
            std::fs::copy(&path, &target).map_err(|e| io_err(&path, e))?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
