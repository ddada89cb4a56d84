// ============================================================================
// seqenc-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Encode Request and Fixed Encoding Profile
//
// This module defines the user-facing request record consumed by the planner
// and the constants that make up the fixed "sensible defaults" profile passed
// to ffmpeg on every invocation.
//
// KEY COMPONENTS:
// - FrameInput: How frames are addressed (template or manifest)
// - EncodeRequest: Immutable record of everything the user asked for
// - Encoding profile constants: codec, preset, tune, filters, file names
//
// USAGE:
// The CLI builds an EncodeRequest from parsed arguments and hands it to
// `runner::run_encode`. The request is never mutated afterwards; derived
// values live in `plan::EncodePlan`.

use crate::error::{CoreError, CoreResult};
use std::path::PathBuf;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Frames per second when the user does not specify one.
pub const DEFAULT_FRAMERATE: u32 = 24;

/// Container extension appended to generated output names.
pub const CONTAINER_EXTENSION: &str = "mp4";

/// ffmpeg muxer name for the container above.
pub const CONTAINER_FORMAT: &str = "mp4";

/// Demuxer used to read numbered image files.
pub const INPUT_FORMAT: &str = "image2";

pub const VIDEO_CODEC: &str = "libx264";
pub const ENCODER_PRESET: &str = "slower";
pub const ENCODER_TUNE: &str = "grain";
pub const PIXEL_FORMAT: &str = "yuv420p";

/// Rounds frame dimensions down to even values, which yuv420p requires.
pub const EVEN_DIMENSIONS_FILTER: &str = "scale=trunc(iw/2)*2:trunc(ih/2)*2";

/// Digits in the zero-padded index of manifest frame links.
pub const FRAME_INDEX_WIDTH: usize = 5;

/// Extension used for the frame pattern when a manifest lists no frames.
pub const FALLBACK_FRAME_EXTENSION: &str = ".png";

/// Prefix of the scratch directory holding manifest frame links.
pub const SCRATCH_DIR_PREFIX: &str = "seqenc";

/// Statistics files libx264 leaves in the working directory after two passes.
pub const TWO_PASS_STATS_FILES: [&str; 2] = ["ffmpeg2pass-0.log", "ffmpeg2pass-0.log.mbtree"];

/// Program name used when no explicit ffmpeg path is configured.
pub const DEFAULT_FFMPEG_PROGRAM: &str = "ffmpeg";

// ============================================================================
// REQUEST
// ============================================================================

/// Where the encoder reads frames from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameInput {
    /// A printf-style template such as `frame-%03d.png`, passed through as-is.
    Template(String),
    /// A text file listing image paths, one per line.
    Manifest(PathBuf),
}

/// Everything the user asked for, exactly as given.
#[derive(Debug, Clone)]
pub struct EncodeRequest {
    pub input: FrameInput,

    /// Maximum number of frames to encode, 0 for all.
    pub max_frames: u32,

    /// Explicit output path. When `None` a name is derived from the working
    /// directory and the quality settings.
    pub output: Option<PathBuf>,

    /// Bitrate in any unit ffmpeg understands (`2M`, `800k`).
    pub bitrate: Option<String>,

    /// Constant rate factor target.
    pub crf: Option<String>,

    pub framerate: u32,

    /// Explicit pass count. `None` means "infer from bitrate".
    pub passes: Option<i64>,

    /// Keep ffmpeg's two-pass statistics files.
    pub keep_temp: bool,

    /// Let ffmpeg write straight to the terminal.
    pub verbose: bool,

    /// Print the commands instead of running them.
    pub dry_run: bool,

    /// Directory the encoder runs in. Used for the generated output name,
    /// relative manifest entries and the statistics file cleanup.
    pub working_dir: PathBuf,
}

impl EncodeRequest {
    /// Creates a request with default settings for the given input.
    pub fn new(input: FrameInput, working_dir: PathBuf) -> Self {
        Self {
            input,
            max_frames: 0,
            output: None,
            bitrate: None,
            crf: None,
            framerate: DEFAULT_FRAMERATE,
            passes: None,
            keep_temp: false,
            verbose: false,
            dry_run: false,
            working_dir,
        }
    }

    /// Checks the request for values that cannot produce a valid invocation.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(passes) = self.passes {
            if !(1..=2).contains(&passes) {
                return Err(CoreError::Config(
                    "Number of passes must be 1 or 2.".to_string(),
                ));
            }
        }

        if self.framerate == 0 {
            return Err(CoreError::Config(
                "Frame rate must be at least 1.".to_string(),
            ));
        }

        if let FrameInput::Template(template) = &self.input {
            if template.trim().is_empty() {
                return Err(CoreError::Config("Frame template is empty.".to_string()));
            }
        }

        if self.bitrate.as_deref().is_some_and(|b| b.trim().is_empty()) {
            return Err(CoreError::Config("Bitrate is empty.".to_string()));
        }

        if self.crf.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(CoreError::Config("CRF is empty.".to_string()));
        }

        Ok(())
    }
}
