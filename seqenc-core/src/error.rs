// ============================================================================
// seqenc-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for seqenc-core
//
// This module defines the error type returned by every fallible operation in
// the core library, together with a result alias and a few constructor
// helpers for process-related failures.
//
// KEY COMPONENTS:
// - CoreError: Enum of all error kinds the library can produce
// - CoreResult: Type alias for Result<T, CoreError>
// - command_*_error: Helpers for building process errors consistently

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by seqenc-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("\"{0}\" executable not found. (It must be in the search path to use this utility.)")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed while waiting for {0}: {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Manifest '{}' line {line}: {message}", path.display())]
    Manifest {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result alias used throughout the core library.
pub type CoreResult<T> = Result<T, CoreError>;

pub fn command_start_error(program: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(program.into(), err)
}

pub fn command_wait_error(program: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(program.into(), err)
}

pub fn command_failed_error(
    program: impl Into<String>,
    status: ExitStatus,
    detail: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(program.into(), status, detail.into())
}
