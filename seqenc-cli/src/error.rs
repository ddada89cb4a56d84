// ============================================================================
// seqenc-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses the core error type so every failure reaches `main` in the
// same shape, and adds a small extension trait for attaching context.
//
// KEY COMPONENTS:
// - CliResult: Type alias for CLI operations
// - CliErrorContext: Adds context to failed results

// ---- Internal crate imports ----
use seqenc_core::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fmt;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Extension trait for adding context to errors in the CLI.
pub trait CliErrorContext<T> {
    /// Add context to an error.
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", context, core_error))
        })
    }
}
