//! Resolution of an [`EncodeRequest`] into an [`EncodePlan`].
//!
//! Everything here is pure apart from logging: the plan records the decisions
//! (pass count, output path, quality flags, frame limit) that the ffmpeg
//! builder turns into concrete invocations.

use crate::config::{CONTAINER_EXTENSION, EncodeRequest};
use crate::error::CoreResult;
use log::info;
use std::path::PathBuf;

/// Used as the stem of generated output names when the working directory
/// has no base name (e.g. `/`).
const FALLBACK_OUTPUT_STEM: &str = "video";

/// Single pass, or a statistics pass followed by the real encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    Single,
    Double,
}

impl PassMode {
    #[must_use]
    pub fn count(self) -> u8 {
        match self {
            PassMode::Single => 1,
            PassMode::Double => 2,
        }
    }
}

/// Fully resolved encode settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodePlan {
    pub output: PathBuf,
    pub passes: PassMode,
    pub framerate: u32,
    pub bitrate: Option<String>,
    pub crf: Option<String>,
    /// 0 means no limit.
    pub max_frames: u32,
}

impl EncodePlan {
    /// Validates the request and derives the plan from it.
    pub fn resolve(request: &EncodeRequest) -> CoreResult<Self> {
        request.validate()?;

        let bitrate = request.bitrate.as_deref().map(str::trim).map(String::from);
        let crf = request.crf.as_deref().map(str::trim).map(String::from);

        let passes = resolve_passes(request.passes, bitrate.as_deref());

        let output = match &request.output {
            Some(path) => path.clone(),
            None => {
                let dir_name = request
                    .working_dir
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let name = derive_output_name(
                    &dir_name,
                    request.framerate,
                    bitrate.as_deref(),
                    crf.as_deref(),
                    request.max_frames,
                );
                info!("Using output filename \"{name}\".");
                request.working_dir.join(name)
            }
        };

        Ok(Self {
            output,
            passes,
            framerate: request.framerate,
            bitrate,
            crf,
            max_frames: request.max_frames,
        })
    }

    /// Quality arguments: bitrate, CRF, both, or neither.
    #[must_use]
    pub fn quality_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(bitrate) = &self.bitrate {
            args.push("-b:v".to_string());
            args.push(bitrate.clone());
        }
        if let Some(crf) = &self.crf {
            args.push("-crf".to_string());
            args.push(crf.clone());
        }
        args
    }

    /// Frame limit arguments, empty when every frame is encoded.
    #[must_use]
    pub fn frame_limit_args(&self) -> Vec<String> {
        if self.max_frames > 0 {
            vec!["-vframes".to_string(), self.max_frames.to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Chooses the pass mode. An explicit, already validated count wins;
/// otherwise a bitrate implies two passes.
pub fn resolve_passes(passes: Option<i64>, bitrate: Option<&str>) -> PassMode {
    match passes {
        Some(2) => PassMode::Double,
        Some(_) => PassMode::Single,
        None if bitrate.is_some() => {
            info!("Using 2-pass encoding since --bitrate given.");
            PassMode::Double
        }
        None => {
            info!("Using 1-pass encoding.");
            PassMode::Single
        }
    }
}

/// Builds `<dir>-r<fps>[-<bitrate>][-crf<crf>][-n<frames>].mp4`.
#[must_use]
pub fn derive_output_name(
    dir_name: &str,
    framerate: u32,
    bitrate: Option<&str>,
    crf: Option<&str>,
    max_frames: u32,
) -> String {
    let stem = if dir_name.is_empty() {
        FALLBACK_OUTPUT_STEM
    } else {
        dir_name
    };

    let mut name = format!("{stem}-r{framerate}");
    if let Some(bitrate) = bitrate {
        name.push_str(&format!("-{bitrate}"));
    }
    if let Some(crf) = crf {
        name.push_str(&format!("-crf{crf}"));
    }
    if max_frames > 0 {
        name.push_str(&format!("-n{max_frames}"));
    }
    name.push('.');
    name.push_str(CONTAINER_EXTENSION);
    name
}
