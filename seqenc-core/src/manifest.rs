// ============================================================================
// seqenc-core/src/manifest.rs
// ============================================================================
//
// MANIFEST FRAMES: Turning a File List into a Numbered Sequence
//
// ffmpeg's image2 demuxer addresses frames through a single printf-style
// pattern. A manifest lists arbitrarily named images instead, so each entry
// is symlinked into a scratch directory as 00000.ext, 00001.ext, ... and the
// encoder reads `<scratch>/%05d.ext`.
//
// KEY COMPONENTS:
// - read_manifest: Parse the manifest, skipping blank lines
// - infer_extension: Shared extension taken from the first entry
// - FrameSequence: Scratch directory, created links and the frame pattern

use crate::config::{FALLBACK_FRAME_EXTENSION, FRAME_INDEX_WIDTH};
use crate::error::{CoreError, CoreResult};
use crate::temp_files;
use log::{debug, info, warn};
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One non-blank manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// 1-based line number in the manifest file.
    pub line: usize,
    pub path: String,
}

/// Reads a manifest, trimming each line and skipping blank ones.
pub fn read_manifest(path: &Path) -> CoreResult<Vec<ManifestEntry>> {
    let file = fs::File::open(path).map_err(|e| {
        CoreError::PathError(format!("Cannot open manifest '{}': {}", path.display(), e))
    })?;

    let mut entries = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        entries.push(ManifestEntry {
            line: index + 1,
            path: trimmed.to_string(),
        });
    }
    Ok(entries)
}

/// Extension of `entry` including the leading dot, or an empty string.
#[must_use]
pub fn infer_extension(entry: &str) -> String {
    Path::new(entry)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Name of the link for frame `index`.
#[must_use]
pub fn frame_link_name(index: usize, extension: &str) -> String {
    format!("{index:0width$}{extension}", width = FRAME_INDEX_WIDTH)
}

/// printf-style pattern matching [`frame_link_name`].
#[must_use]
pub fn frame_pattern(dir: &Path, extension: &str) -> String {
    dir.join(format!("%0{FRAME_INDEX_WIDTH}d{extension}"))
        .to_string_lossy()
        .into_owned()
}

/// Manifest frames linked into a scratch directory.
#[derive(Debug)]
pub struct FrameSequence {
    dir: TempDir,
    links: Vec<PathBuf>,
    extension: String,
    pattern: String,
}

impl FrameSequence {
    /// Reads `manifest` and links its entries. Relative entries resolve
    /// against `base_dir`.
    pub fn from_manifest(manifest: &Path, base_dir: &Path) -> CoreResult<Self> {
        let entries = read_manifest(manifest)?;
        Self::materialize(manifest, &entries, base_dir)
    }

    /// Creates the scratch directory and one link per entry.
    ///
    /// Every link uses the extension of the first entry. `manifest` is only
    /// used for error messages.
    pub fn materialize(
        manifest: &Path,
        entries: &[ManifestEntry],
        base_dir: &Path,
    ) -> CoreResult<Self> {
        let dir = temp_files::create_scratch_dir()?;

        let extension = match entries.first() {
            Some(first) => {
                let ext = infer_extension(&first.path);
                info!("Using frame image extension \"{ext}\".");
                ext
            }
            None => {
                warn!(
                    "Manifest '{}' lists no frames; nothing will be linked.",
                    manifest.display()
                );
                FALLBACK_FRAME_EXTENSION.to_string()
            }
        };
        let pattern = frame_pattern(dir.path(), &extension);

        let mut sequence = Self {
            dir,
            links: Vec::with_capacity(entries.len()),
            extension,
            pattern,
        };

        if !entries.is_empty() {
            info!("Making frame symlinks.");
        }
        for (index, entry) in entries.iter().enumerate() {
            let target = resolve_target(base_dir, &entry.path);
            if let Err(e) = fs::metadata(&target) {
                let message = if e.kind() == io::ErrorKind::NotFound {
                    format!("frame '{}' does not exist", target.display())
                } else {
                    format!("cannot access frame '{}': {}", target.display(), e)
                };
                return Err(CoreError::Manifest {
                    path: manifest.to_path_buf(),
                    line: entry.line,
                    message,
                });
            }

            let link = sequence
                .dir
                .path()
                .join(frame_link_name(index, &sequence.extension));
            create_link(&target, &link)?;
            debug!("{} -> {}", link.display(), target.display());
            sequence.links.push(link);
        }

        Ok(sequence)
    }

    /// Pattern to pass to ffmpeg's `-i`.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn links(&self) -> &[PathBuf] {
        &self.links
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Removes every link, newest first, then the scratch directory.
    /// Entries that are already gone are skipped. Returns the number of
    /// links removed.
    pub fn cleanup(self) -> CoreResult<usize> {
        let Self { dir, links, .. } = self;

        if !links.is_empty() {
            info!("Cleaning up frame symlinks.");
        }
        let mut removed = 0;
        for link in links.iter().rev() {
            if temp_files::remove_file_if_exists(link)? {
                removed += 1;
            }
        }

        let dir_path = dir.path().to_path_buf();
        match dir.close() {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(CoreError::PathError(format!(
                    "Failed to remove scratch directory '{}': {}",
                    dir_path.display(),
                    e
                )));
            }
        }
        debug!("Removed scratch directory {}", dir_path.display());
        Ok(removed)
    }
}

fn resolve_target(base_dir: &Path, entry: &str) -> PathBuf {
    let path = Path::new(entry);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(unix)]
fn create_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
