// seqenc-cli/src/lib.rs
//
// Library portion of the seqenc CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::encode::{build_request, run_encode};
