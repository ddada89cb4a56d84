// seqenc-cli/src/main.rs
//
// Entry point for the `seqenc` binary.
//
// Responsibilities:
// - Parsing arguments (clap exits with code 2 on syntax errors, including
//   giving both or neither of --framespec and --manifest).
// - Setting up logging.
// - Checking that ffmpeg can be started before doing any work.
// - Running the encode and mapping any failure to exit code 1.

use clap::Parser;
use owo_colors::OwoColorize;
use seqenc_cli::error::{CliErrorContext, CliResult};
use seqenc_cli::{Cli, logging, run_encode};
use std::io::IsTerminal;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let use_color =
                std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
            if use_color {
                eprintln!("{} {}", "Error:".red().bold(), e);
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    seqenc_core::check_dependency(&cli.ffmpeg)?;

    let working_dir =
        std::env::current_dir().cli_context("Cannot determine the working directory")?;

    run_encode(cli, working_dir)?;
    Ok(())
}
