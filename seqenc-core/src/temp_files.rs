//! Temporary file management utilities.
//!
//! The scratch directory for manifest frame links comes from the tempfile
//! crate so it is removed on drop even when a run bails out early. The
//! statistics files ffmpeg leaves behind after a two-pass encode are removed
//! explicitly.

use crate::config::{SCRATCH_DIR_PREFIX, TWO_PASS_STATS_FILES};
use crate::error::CoreResult;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder as TempFileBuilder, TempDir};

/// Creates the scratch directory under the system temp dir. Auto-cleaned when dropped.
pub fn create_scratch_dir() -> CoreResult<TempDir> {
    let dir = TempFileBuilder::new()
        .prefix(SCRATCH_DIR_PREFIX)
        .tempdir()?;
    debug!("Created scratch directory {}", dir.path().display());
    Ok(dir)
}

/// Removes a file, treating "already gone" as success. Returns whether a
/// file was actually removed.
pub fn remove_file_if_exists(path: &Path) -> CoreResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Deletes ffmpeg's two-pass statistics files from `dir`, returning the
/// paths that existed and were removed.
pub fn remove_stats_files(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for name in TWO_PASS_STATS_FILES {
        let path = dir.join(name);
        if remove_file_if_exists(&path)? {
            debug!("Removed {}", path.display());
            removed.push(path);
        }
    }
    Ok(removed)
}
