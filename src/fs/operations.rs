//! Filesystem operations for module tree generation
//!
//! Directory creation is idempotent and file writes always overwrite,
//! so re-running a build over an existing tree is safe.

use crate::error::{IoResultExt, Result, SyllabusError};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Outcome of [`ensure_directory`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryStatus {
    /// The directory was created by this call
    Created,
    /// The directory already existed and was reused
    Existing,
}

/// Ensure `path` exists as a directory, creating intermediate segments.
///
/// Succeeds without touching anything when the directory already exists.
/// Fails with [`SyllabusError::PathCollision`] if a file (or anything
/// else that is not a directory) occupies the path.
pub fn ensure_directory(path: &Path) -> Result<DirectoryStatus> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(DirectoryStatus::Existing),
        Ok(_) => return Err(SyllabusError::PathCollision(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(SyllabusError::filesystem(path, e)),
    }

    std::fs::create_dir_all(path).map_err(|e| {
        // something other than a directory appeared after the metadata check
        if path.exists() && !path.is_dir() {
            SyllabusError::PathCollision(path.to_path_buf())
        } else {
            SyllabusError::filesystem(path, e)
        }
    })?;

    Ok(DirectoryStatus::Created)
}

/// Write `contents` to `path`, truncating any existing file
pub fn write_file(path: &Path, contents: &str) -> Result<u64> {
    if path.is_dir() {
        return Err(SyllabusError::PathCollision(path.to_path_buf()));
    }

    let mut file = File::create(path).with_path(path)?;
    file.write_all(contents.as_bytes()).with_path(path)?;
    file.flush().with_path(path)?;

    Ok(contents.len() as u64)
}
