// ============================================================================
// seqenc-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg Executable
//
// This module encapsulates everything that touches ffmpeg: building the
// argument lists, spawning and supervising the process, and checking that
// the executable exists at all.
//
// KEY COMPONENTS:
// - ffmpeg_builder: FfmpegInvocation and the fixed encoding profile
// - ffmpeg_executor: Spawner traits and the sidecar-backed implementation
// - check_dependency: Verifies the executable can be started

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::ffi::OsStr;
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains ffmpeg argument building logic
pub mod ffmpeg_builder;

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

#[cfg(all(unix, any(test, feature = "test-mocks")))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_builder::{FfmpegInvocation, NULL_OUTPUT, build_invocations};
pub use ffmpeg_executor::{
    FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner, run_invocation,
};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that `program` exists and can be started.
///
/// Runs `<program> -version` with all output discarded. The exit status is
/// not inspected; only whether the process could be launched.
///
/// * `Err(CoreError::DependencyNotFound)` - the executable is not on the path
/// * `Err(CoreError::CommandStart)` - it exists but could not be started
pub fn check_dependency<S: AsRef<OsStr>>(program: S) -> CoreResult<()> {
    let program = program.as_ref();
    let name = program.to_string_lossy().into_owned();

    let result = Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(CoreError::DependencyNotFound(name))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", name, e);
            Err(CoreError::CommandStart(name, e))
        }
    }
}
