//! Command implementations for the CLI.

/// Turns parsed arguments into an encode request and runs it.
pub mod encode;
