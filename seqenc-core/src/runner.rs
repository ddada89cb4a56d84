// ============================================================================
// seqenc-core/src/runner.rs
// ============================================================================
//
// RUNNER: One Complete Encode From Request to Cleanup
//
// Resolves the plan, materializes manifest frames, builds the invocations,
// then either prints them (dry run) or runs them one after another. Frame
// links and the scratch directory are removed whatever the outcome; the
// two-pass statistics files are removed unless the user keeps them.
//
// KEY COMPONENTS:
// - RunOptions: Settings that are not part of the user's encode request
// - EncodeSummary: What happened, for the CLI to report
// - run_encode: The entry point

use crate::config::{DEFAULT_FFMPEG_PROGRAM, EncodeRequest, FrameInput};
use crate::error::CoreResult;
use crate::external::{FfmpegInvocation, FfmpegSpawner, build_invocations, run_invocation};
use crate::manifest::FrameSequence;
use crate::plan::{EncodePlan, PassMode};
use crate::temp_files;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Settings for how the encode is carried out.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// ffmpeg executable, a bare name resolved through `PATH` or a path.
    pub ffmpeg_program: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ffmpeg_program: PathBuf::from(DEFAULT_FFMPEG_PROGRAM),
        }
    }
}

/// Outcome of a successful [`run_encode`].
#[derive(Debug, Clone)]
pub struct EncodeSummary {
    pub output: PathBuf,
    pub passes: PassMode,
    pub invocations: Vec<FfmpegInvocation>,
    /// Number of manifest frames linked, `None` in template mode.
    pub frames_linked: Option<usize>,
    pub removed_stats_files: Vec<PathBuf>,
    pub dry_run: bool,
    pub elapsed: Duration,
}

/// Runs (or, for a dry run, prints) the encode described by `request`.
///
/// All validation happens before anything touches the filesystem. A failed
/// ffmpeg run stops the sequence; cleanup still happens and the ffmpeg
/// failure is the error returned.
pub fn run_encode<S: FfmpegSpawner>(
    request: &EncodeRequest,
    spawner: &S,
    options: &RunOptions,
) -> CoreResult<EncodeSummary> {
    let start = Instant::now();
    let plan = EncodePlan::resolve(request)?;

    let (sequence, pattern) = match &request.input {
        FrameInput::Template(template) => (None, template.clone()),
        FrameInput::Manifest(manifest) => {
            let manifest = resolve_in(&request.working_dir, manifest);
            let sequence = FrameSequence::from_manifest(&manifest, &request.working_dir)?;
            let pattern = sequence.pattern().to_string();
            (Some(sequence), pattern)
        }
    };
    debug!("Frame pattern: {pattern}");

    let invocations = build_invocations(&plan, &pattern);
    let frames_linked = sequence.as_ref().map(FrameSequence::len);
    let total_frames = expected_frames(frames_linked, plan.max_frames);

    let outcome = if request.dry_run {
        for invocation in &invocations {
            println!(
                "{}",
                invocation.display_with_program(&options.ffmpeg_program.to_string_lossy())
            );
        }
        Ok(())
    } else {
        execute_all(spawner, options, request, &invocations, total_frames)
    };

    let cleanup = match sequence {
        Some(sequence) => sequence.cleanup().map(|removed| {
            debug!("Removed {removed} frame links");
        }),
        None => Ok(()),
    };

    let stats = if request.keep_temp || request.dry_run {
        Ok(Vec::new())
    } else {
        temp_files::remove_stats_files(&request.working_dir)
    };

    if let Err(e) = outcome {
        if let Err(cleanup_err) = &cleanup {
            warn!("Cleanup after failure also failed: {cleanup_err}");
        }
        return Err(e);
    }
    cleanup?;
    let removed_stats_files = stats?;

    Ok(EncodeSummary {
        output: plan.output,
        passes: plan.passes,
        invocations,
        frames_linked,
        removed_stats_files,
        dry_run: request.dry_run,
        elapsed: start.elapsed(),
    })
}

fn execute_all<S: FfmpegSpawner>(
    spawner: &S,
    options: &RunOptions,
    request: &EncodeRequest,
    invocations: &[FfmpegInvocation],
    total_frames: Option<u64>,
) -> CoreResult<()> {
    for invocation in invocations {
        run_invocation(
            spawner,
            &options.ffmpeg_program,
            &request.working_dir,
            invocation,
            request.verbose,
            total_frames,
        )?;
    }
    info!("ffmpeg finished");
    Ok(())
}

/// Frames ffmpeg should produce, when it can be known up front.
fn expected_frames(frames_linked: Option<usize>, max_frames: u32) -> Option<u64> {
    let limit = (max_frames > 0).then_some(u64::from(max_frames));
    match (frames_linked.map(|n| n as u64), limit) {
        (Some(linked), Some(limit)) => Some(linked.min(limit)),
        (Some(linked), None) => Some(linked),
        (None, limit) => limit,
    }
}

fn resolve_in(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
