//! FFmpeg command builder utilities
//!
//! Turns an [`EncodePlan`] and a frame pattern into the ordered list of
//! ffmpeg invocations. Every invocation carries the same fixed profile
//! (libx264, `slower` preset, `grain` tune, yuv420p, even dimensions); two
//! pass encodes differ only in the `-pass` flag and the output target.

use crate::config::{
    CONTAINER_FORMAT, ENCODER_PRESET, ENCODER_TUNE, EVEN_DIMENSIONS_FILTER, INPUT_FORMAT,
    PIXEL_FORMAT, VIDEO_CODEC,
};
use crate::plan::{EncodePlan, PassMode};
use ffmpeg_sidecar::command::FfmpegCommand;
use std::ffi::OsStr;
use std::fmt;

/// Where pass 1 of a two-pass encode sends its discarded output.
#[cfg(not(windows))]
pub const NULL_OUTPUT: &str = "/dev/null";
#[cfg(windows)]
pub const NULL_OUTPUT: &str = "NUL";

/// A single planned run of ffmpeg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegInvocation {
    /// `Some(n)` for pass `n` of a two-pass encode.
    pub pass: Option<u8>,
    /// Arguments after the program name.
    pub args: Vec<String>,
}

impl FfmpegInvocation {
    /// Short label for logs ("pass 1/2", "single pass").
    #[must_use]
    pub fn label(&self) -> String {
        match self.pass {
            Some(n) => format!("pass {n}/2"),
            None => "single pass".to_string(),
        }
    }

    /// Shell-quoted command line, suitable for copying into a terminal.
    #[must_use]
    pub fn display_with_program(&self, program: &str) -> String {
        std::iter::once(program)
            .chain(self.args.iter().map(String::as_str))
            .map(quote)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Builds the sidecar command for `program`.
    #[must_use]
    pub fn to_command<S: AsRef<OsStr>>(&self, program: S) -> FfmpegCommand {
        let mut cmd = FfmpegCommand::new_with_path(program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for FfmpegInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with_program("ffmpeg"))
    }
}

fn quote(arg: &str) -> String {
    // Only NUL bytes make quoting fail; fall back to the raw text for display.
    shlex::try_quote(arg)
        .map(|q| q.into_owned())
        .unwrap_or_else(|_| arg.to_string())
}

/// Builds the invocations for `plan`, reading frames from `pattern`.
#[must_use]
pub fn build_invocations(plan: &EncodePlan, pattern: &str) -> Vec<FfmpegInvocation> {
    let output = plan.output.to_string_lossy();
    match plan.passes {
        PassMode::Single => vec![FfmpegInvocation {
            pass: None,
            args: encode_args(plan, pattern, None, &output),
        }],
        PassMode::Double => vec![
            FfmpegInvocation {
                pass: Some(1),
                args: encode_args(plan, pattern, Some(1), NULL_OUTPUT),
            },
            FfmpegInvocation {
                pass: Some(2),
                args: encode_args(plan, pattern, Some(2), &output),
            },
        ],
    }
}

fn encode_args(plan: &EncodePlan, pattern: &str, pass: Option<u8>, output: &str) -> Vec<String> {
    let framerate = plan.framerate.to_string();

    let mut args: Vec<String> = vec![
        "-f".into(),
        INPUT_FORMAT.into(),
        "-r".into(),
        framerate.clone(),
        "-i".into(),
        pattern.into(),
        "-c:v".into(),
        VIDEO_CODEC.into(),
        "-r".into(),
        framerate,
    ];
    args.extend(plan.quality_args());
    args.extend([
        "-pix_fmt".into(),
        PIXEL_FORMAT.into(),
        "-vf".into(),
        EVEN_DIMENSIONS_FILTER.into(),
        "-preset".into(),
        ENCODER_PRESET.into(),
        "-tune".into(),
        ENCODER_TUNE.into(),
    ]);
    if let Some(pass) = pass {
        args.push("-pass".into());
        args.push(pass.to_string());
    }
    args.push("-f".into());
    args.push(CONTAINER_FORMAT.into());
    args.extend(plan.frame_limit_args());
    args.push("-y".into());
    args.push(output.into());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn plan(passes: PassMode) -> EncodePlan {
        EncodePlan {
            output: PathBuf::from("clip-r24.mp4"),
            passes,
            framerate: 24,
            bitrate: None,
            crf: None,
            max_frames: 0,
        }
    }

    #[test]
    fn single_pass_writes_output_once() {
        let invocations = build_invocations(&plan(PassMode::Single), "f-%03d.png");

        assert_eq!(invocations.len(), 1);
        let args = &invocations[0].args;
        assert_eq!(invocations[0].pass, None);
        assert!(!args.contains(&"-pass".to_string()));
        assert_eq!(args.last().unwrap(), "clip-r24.mp4");
        assert_eq!(
            args.join(" "),
            "-f image2 -r 24 -i f-%03d.png -c:v libx264 -r 24 -pix_fmt yuv420p \
             -vf scale=trunc(iw/2)*2:trunc(ih/2)*2 -preset slower -tune grain \
             -f mp4 -y clip-r24.mp4"
        );
    }

    #[test]
    fn two_pass_discards_first_output() {
        let mut p = plan(PassMode::Double);
        p.bitrate = Some("2M".to_string());
        let invocations = build_invocations(&p, "f-%03d.png");

        assert_eq!(invocations.len(), 2);
        let first = invocations[0].args.join(" ");
        let second = invocations[1].args.join(" ");
        assert!(first.contains("-b:v 2M"));
        assert!(first.contains("-pass 1 -f mp4 -y /dev/null") || cfg!(windows));
        assert!(second.contains("-pass 2 -f mp4 -y clip-r24.mp4"));
        assert_eq!(invocations[0].label(), "pass 1/2");
    }

    #[test]
    fn frame_limit_precedes_overwrite_flag() {
        let mut p = plan(PassMode::Single);
        p.max_frames = 100;
        p.crf = Some("20".to_string());
        let args = build_invocations(&p, "x%d.png").remove(0).args.join(" ");

        assert!(args.contains("-c:v libx264 -r 24 -crf 20 -pix_fmt"));
        assert!(args.ends_with("-f mp4 -vframes 100 -y clip-r24.mp4"));
    }

    #[test]
    fn display_quotes_shell_sensitive_arguments() {
        let invocations = build_invocations(&plan(PassMode::Single), "my frames/%05d.png");
        let shown = invocations[0].display_with_program("ffmpeg");

        assert!(shown.starts_with("ffmpeg -f image2 -r 24 -i "));
        assert!(!shown.contains(" my frames/"));

        let reparsed = shlex::split(&shown).unwrap();
        assert_eq!(reparsed[0], "ffmpeg");
        assert_eq!(&reparsed[1..], invocations[0].args.as_slice());
    }

    #[test]
    fn command_carries_all_arguments() {
        let invocation = &build_invocations(&plan(PassMode::Single), "f%d.png")[0];
        let cmd = invocation.to_command("ffmpeg");
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        // The sidecar may prepend its own log level arguments.
        assert!(args.ends_with(&invocation.args));
    }
}
