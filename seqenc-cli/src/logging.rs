// ============================================================================
// seqenc-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Initialization
//
// All diagnostics go to stderr through the `log` facade so stdout carries
// nothing but dry-run commands.
//
// USAGE:
// - RUST_LOG=info (default): Normal operation logs
// - RUST_LOG=debug (or --verbose): Commands, links and cleanup details
// - RUST_LOG=trace: Very verbose debugging information

use env_logger::{Builder, Env, Target};
use log::Level;
use std::io::Write;

/// Default filter when `RUST_LOG` is unset.
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Prefix written before a message of `level`; info lines are bare.
#[must_use]
pub fn level_prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR: ",
        Level::Warn => "WARNING: ",
        Level::Info => "",
        Level::Debug => "DEBUG: ",
        Level::Trace => "TRACE: ",
    }
}

/// Initializes the global logger. Safe to call once per process.
pub fn init(verbose: bool) {
    Builder::from_env(Env::default().default_filter_or(default_filter(verbose)))
        .target(Target::Stderr)
        .format(|buf, record| writeln!(buf, "{}{}", level_prefix(record.level()), record.args()))
        .init();
}

/// Returns the current local timestamp formatted as "YYYY-MM-DD HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
