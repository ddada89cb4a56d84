//! Core library for turning a numbered sequence of still images into an
//! H.264 MP4 file with ffmpeg.
//!
//! The library plans the encode (pass count, output name, quality flags),
//! links manifest-listed images into a sequence ffmpeg can address with a
//! single pattern, and runs the one or two ffmpeg invocations in order.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use seqenc_core::{EncodeRequest, FrameInput, RunOptions, SidecarSpawner, run_encode};
//! use std::path::PathBuf;
//!
//! let mut request = EncodeRequest::new(
//!     FrameInput::Template("frame-%04d.png".to_string()),
//!     std::env::current_dir().unwrap(),
//! );
//! request.bitrate = Some("4M".to_string());
//! request.output = Some(PathBuf::from("out.mp4"));
//!
//! let summary = run_encode(&request, &SidecarSpawner, &RunOptions::default()).unwrap();
//! println!("wrote {}", summary.output.display());
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod manifest;
pub mod plan;
pub mod progress_reporting;
pub mod runner;
pub mod temp_files;
pub mod terminal;

// Re-exports for public API
pub use config::{EncodeRequest, FrameInput};
pub use error::{CoreError, CoreResult};
pub use external::{
    FfmpegInvocation, FfmpegSpawner, SidecarSpawner, build_invocations, check_dependency,
};
pub use manifest::{FrameSequence, read_manifest};
pub use plan::{EncodePlan, PassMode, derive_output_name, resolve_passes};
pub use runner::{EncodeSummary, RunOptions, run_encode};
