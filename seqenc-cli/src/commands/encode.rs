//! Implementation of the encode command.
//!
//! Converts parsed arguments into an immutable `EncodeRequest`, hands it to
//! seqenc-core together with the sidecar spawner, and reports the result.

use crate::cli::Cli;
use crate::error::CliResult;
use crate::logging::get_timestamp;

use seqenc_core::terminal;
use seqenc_core::{EncodeRequest, EncodeSummary, FrameInput, RunOptions, SidecarSpawner};

use log::debug;
use std::path::PathBuf;

/// Builds the request for `cli`, running in `working_dir`.
///
/// clap guarantees exactly one of `--framespec` and `--manifest` is set.
#[must_use]
pub fn build_request(cli: &Cli, working_dir: PathBuf) -> EncodeRequest {
    let input = match (&cli.framespec, &cli.manifest) {
        (Some(template), _) => FrameInput::Template(template.clone()),
        (None, Some(manifest)) => FrameInput::Manifest(manifest.clone()),
        (None, None) => FrameInput::Template(String::new()),
    };

    let mut request = EncodeRequest::new(input, working_dir);
    request.max_frames = cli.numframes;
    request.output = cli.output.clone();
    request.bitrate = cli.bitrate.clone();
    request.crf = cli.crf.clone();
    request.framerate = cli.framerate;
    request.passes = cli.passes;
    request.keep_temp = cli.keep_temp;
    request.verbose = cli.verbose;
    request.dry_run = cli.dry_run;
    request
}

/// Runs the encode described by `cli` and prints a short summary.
pub fn run_encode(cli: &Cli, working_dir: PathBuf) -> CliResult<EncodeSummary> {
    debug!("Run started: {}", get_timestamp());

    let request = build_request(cli, working_dir);
    debug!("Request: {:?}", request);

    let options = RunOptions {
        ffmpeg_program: cli.ffmpeg.clone(),
    };
    let summary = seqenc_core::run_encode(&request, &SidecarSpawner, &options)?;

    if !summary.dry_run {
        report(&summary);
    }

    debug!("Finished at: {}", get_timestamp());
    Ok(summary)
}

fn report(summary: &EncodeSummary) {
    terminal::print_section("Encoding complete");
    terminal::print_status("Output", &summary.output.display().to_string(), true);
    terminal::print_status("Passes", &summary.passes.count().to_string(), false);
    if let Some(frames) = summary.frames_linked {
        terminal::print_status("Frames linked", &frames.to_string(), false);
    }
    if !summary.removed_stats_files.is_empty() {
        terminal::print_status(
            "Removed",
            &format!("{} statistics file(s)", summary.removed_stats_files.len()),
            false,
        );
    }
    terminal::print_status(
        "Time",
        &format!("{:.1}s", summary.elapsed.as_secs_f64()),
        false,
    );
    terminal::print_success(&format!("Wrote {}", summary.output.display()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn template_arguments_map_onto_request() {
        let cli = Cli::parse_from([
            "seqenc", "-f", "f%04d.png", "-b", "900k", "-n", "12", "-r", "25", "--dry-run",
        ]);
        let request = build_request(&cli, PathBuf::from("/work/reel"));

        assert_eq!(request.input, FrameInput::Template("f%04d.png".to_string()));
        assert_eq!(request.bitrate.as_deref(), Some("900k"));
        assert_eq!(request.max_frames, 12);
        assert_eq!(request.framerate, 25);
        assert!(request.dry_run);
        assert!(request.passes.is_none());
        assert_eq!(request.working_dir, PathBuf::from("/work/reel"));
    }

    #[test]
    fn manifest_arguments_map_onto_request() {
        let cli = Cli::parse_from(["seqenc", "-m", "list.txt", "-p", "2", "--keep-temp"]);
        let request = build_request(&cli, PathBuf::from("/work"));

        assert_eq!(request.input, FrameInput::Manifest(PathBuf::from("list.txt")));
        assert_eq!(request.passes, Some(2));
        assert!(request.keep_temp);
    }
}
