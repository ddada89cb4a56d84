// ============================================================================
// seqenc-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with FFmpeg
// processes, and the routine that runs one planned invocation to completion.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
// - run_invocation: Spawn, report progress, wait, check the exit status
//
// ARCHITECTURE:
// The spawner is injected so tests can substitute MockFfmpegSpawner and
// inspect the arguments without an ffmpeg binary.

use crate::error::{
    CoreError, CoreResult, command_failed_error, command_start_error, command_wait_error,
};
use crate::external::ffmpeg_builder::FfmpegInvocation;
use crate::progress_reporting::FfmpegProgressHandler;
use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use log::{debug, info};
use std::path::Path;
use std::process::{Child, ExitStatus, Stdio};

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command with its output piped for event parsing.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
    /// Spawns the ffmpeg command writing straight to this process's
    /// stdout and stderr. The returned process yields no events.
    fn spawn_inherited(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// A running ffmpeg, either parsed through ffmpeg-sidecar or attached to
/// the terminal.
pub enum SidecarProcess {
    Parsed(SidecarChild),
    Inherited(Child),
}

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let child = match self {
            Self::Parsed(child) => child,
            Self::Inherited(_) => return Ok(()),
        };
        let iterator = child.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {}", e);
            CoreError::OperationFailed(format!("Cannot read ffmpeg output: {e}"))
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        let result = match self {
            Self::Parsed(child) => child.wait(),
            Self::Inherited(child) => child.wait(),
        };
        result.map_err(|e| command_wait_error("ffmpeg", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess::Parsed)
            .map_err(|e| command_start_error("ffmpeg", e))
    }

    // FfmpegChild requires all three pipes, so the inner command is
    // spawned directly here.
    fn spawn_inherited(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.as_inner_mut()
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map(SidecarProcess::Inherited)
            .map_err(|e| command_start_error("ffmpeg", e))
    }
}

// --- Invocation Runner ---

/// Runs one invocation from `working_dir` and waits for it.
///
/// In verbose mode ffmpeg writes straight to the terminal; otherwise its
/// output is parsed into a progress bar and its errors are logged. A
/// non-zero exit becomes `CoreError::CommandFailed`.
pub fn run_invocation<S: FfmpegSpawner>(
    spawner: &S,
    program: &Path,
    working_dir: &Path,
    invocation: &FfmpegInvocation,
    verbose: bool,
    total_frames: Option<u64>,
) -> CoreResult<()> {
    let label = invocation.label();
    let mut cmd = invocation.to_command(program);
    cmd.as_inner_mut().current_dir(working_dir);

    info!("Running ffmpeg ({label})");
    debug!(
        "Command: {}",
        invocation.display_with_program(&program.to_string_lossy())
    );

    let mut process = if verbose {
        spawner.spawn_inherited(cmd)?
    } else {
        spawner.spawn(cmd)?
    };

    let handler = if verbose {
        None
    } else {
        let mut handler = FfmpegProgressHandler::new(&label, total_frames);
        let events = process.handle_events(|event| handler.handle_event(event));
        handler.finish();
        events?;
        Some(handler)
    };

    let status = process.wait()?;
    if !status.success() {
        let detail = handler
            .as_ref()
            .map(FfmpegProgressHandler::error_summary)
            .unwrap_or_else(|| "see ffmpeg output above".to_string());
        return Err(command_failed_error(format!("ffmpeg ({label})"), status, detail));
    }

    if let Some(handler) = &handler {
        debug!("ffmpeg ({label}) reported {} frames", handler.frames_encoded());
    }
    Ok(())
}
