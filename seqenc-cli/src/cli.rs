// seqenc-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use crate::config::{AFTER_HELP, FFMPEG_ENV_VAR};
use clap::{ArgGroup, Parser};
use seqenc_core::config::{DEFAULT_FFMPEG_PROGRAM, DEFAULT_FRAMERATE};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "seqenc",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Encode a sequence of images to an h.264 video file",
    long_about = "Encode a sequence of images to an h.264 mp4 file using ffmpeg with sensible defaults.",
    after_help = AFTER_HELP
)]
#[command(group(
    ArgGroup::new("frames")
        .required(true)
        .args(["framespec", "manifest"])
))]
pub struct Cli {
    /// Printf-style template for names of the image files (e.g. "frame-%03d.png")
    #[arg(short = 'f', long, value_name = "TEMPLATE")]
    pub framespec: Option<String>,

    /// Text file with list of image filenames, one per line
    #[arg(short = 'm', long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Maximum number of frames to encode, 0=all
    #[arg(short = 'n', long, value_name = "N", default_value_t = 0)]
    pub numframes: u32,

    /// Output filename; default is to generate a name
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Bitrate (units "k", "m", etc. known to ffmpeg are accepted)
    #[arg(short, long, value_name = "RATE")]
    pub bitrate: Option<String>,

    /// Target CRF (18 to 28, lower is better)
    #[arg(short, long, value_name = "CRF")]
    pub crf: Option<String>,

    /// Frames per second
    #[arg(short = 'r', long, value_name = "FPS", default_value_t = DEFAULT_FRAMERATE)]
    pub framerate: u32,

    /// Number of passes (default: 2 if --bitrate given, else 1)
    // Any integer is accepted here so out-of-range counts reach validation.
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub passes: Option<i64>,

    /// Do not delete ffmpeg temporary files
    #[arg(long)]
    pub keep_temp: bool,

    /// Show full ffmpeg output
    #[arg(short, long)]
    pub verbose: bool,

    /// Show what would be done, but don't do it
    #[arg(long)]
    pub dry_run: bool,

    /// ffmpeg executable to run
    #[arg(long, value_name = "PATH", env = FFMPEG_ENV_VAR, default_value = DEFAULT_FFMPEG_PROGRAM)]
    pub ffmpeg: PathBuf,
}
