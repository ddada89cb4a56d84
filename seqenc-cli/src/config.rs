// seqenc-cli/src/config.rs
//
// Defines constants for the `seqenc` command line: help text and the
// environment variable that overrides the ffmpeg executable.

/// Environment variable consulted when `--ffmpeg` is not given.
pub const FFMPEG_ENV_VAR: &str = "SEQENC_FFMPEG";

/// Printed after the option list in `--help`.
pub const AFTER_HELP: &str = "\
The main options affecting output quality are -b/--bitrate and -c/--crf,
and most of the time just one of these should be used. Using -b/--bitrate
sets a *bit rate maximum* and attempts to maximize perceived quality.
Using -c/--crf sets a *quality goal* and attempts to minimize the bit rate
required to meet that goal.";
