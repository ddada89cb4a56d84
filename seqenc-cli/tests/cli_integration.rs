// seqenc-cli/tests/cli_integration.rs
//
// Runs the compiled binary against a stub ffmpeg script that records its
// arguments, so no real encoder is needed.
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

const STUB_SCRIPT: &str = r#"#!/bin/sh
echo "$*" >> "$SEQENC_STUB_LOG"
case "$*" in
  *-version*) exit 0 ;;
esac
exit "${SEQENC_STUB_EXIT:-0}"
"#;

struct Fixture {
    _root: TempDir,
    work: PathBuf,
    stub: PathBuf,
    log: PathBuf,
}

impl Fixture {
    fn new() -> Result<Self, Box<dyn Error>> {
        let root = tempdir()?;
        let work = root.path().join("reel");
        fs::create_dir(&work)?;

        let stub = root.path().join("fake-ffmpeg");
        fs::write(&stub, STUB_SCRIPT)?;
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755))?;

        let log = root.path().join("calls.log");
        Ok(Self {
            _root: root,
            work,
            stub,
            log,
        })
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("seqenc").expect("Failed to find seqenc binary");
        cmd.current_dir(&self.work)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env("SEQENC_STUB_LOG", &self.log)
            .arg("--ffmpeg")
            .arg(&self.stub);
        cmd
    }

    /// Recorded stub invocations, excluding the `-version` probe.
    fn encode_calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .filter(|line| !line.contains("-version"))
            .map(String::from)
            .collect()
    }

    fn write_frames(&self, names: &[&str]) -> Result<PathBuf, Box<dyn Error>> {
        for name in names {
            fs::write(self.work.join(name), b"img")?;
        }
        let manifest = self.work.join("frames.txt");
        fs::write(&manifest, names.join("\n"))?;
        Ok(manifest)
    }
}

fn input_pattern(command_line: &str) -> Option<PathBuf> {
    let mut parts = command_line.split_whitespace();
    while let Some(part) = parts.next() {
        if part == "-i" {
            return parts.next().map(|p| PathBuf::from(p.trim_matches('\'')));
        }
    }
    None
}

#[test]
fn both_input_selectors_are_rejected_before_any_work() -> Result<(), Box<dyn Error>> {
    let fx = Fixture::new()?;

    fx.cmd()
        .args(["-f", "f%03d.png", "-m", "frames.txt"])
        .assert()
        .code(2)
        .stderr(contains("cannot be used with"));

    assert!(!fx.log.exists());
    Ok(())
}

#[test]
fn an_input_selector_is_required() -> Result<(), Box<dyn Error>> {
    let fx = Fixture::new()?;
    fx.cmd().args(["-b", "2M"]).assert().code(2);
    assert!(!fx.log.exists());
    Ok(())
}

#[test]
fn missing_ffmpeg_exits_with_one() -> Result<(), Box<dyn Error>> {
    let fx = Fixture::new()?;

    Command::cargo_bin("seqenc")?
        .current_dir(&fx.work)
        .env("NO_COLOR", "1")
        .args(["--ffmpeg", "/definitely/not/here/ffmpeg", "-f", "f%03d.png"])
        .assert()
        .code(1)
        .stderr(contains("executable not found"));
    Ok(())
}

#[test]
fn invalid_pass_count_exits_with_one() -> Result<(), Box<dyn Error>> {
    let fx = Fixture::new()?;

    for passes in ["3", "0", "300", "-1"] {
        fx.cmd()
            .args(["-f", "f%03d.png", "-p", passes])
            .assert()
            .code(1)
            .stderr(contains("Number of passes must be 1 or 2"));
    }

    assert!(fx.encode_calls().is_empty());
    Ok(())
}

#[test]
fn dry_run_prints_both_passes_without_running_them() -> Result<(), Box<dyn Error>> {
    let fx = Fixture::new()?;

    fx.cmd()
        .args(["-f", "f%03d.png", "-b", "2M", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("-pass 1").and(contains("-pass 2")))
        .stdout(contains("reel-r24-2M.mp4"))
        .stderr(contains("Using 2-pass encoding since --bitrate given."));

    assert!(fx.encode_calls().is_empty());
    Ok(())
}

#[test]
fn two_pass_encode_runs_passes_in_order() -> Result<(), Box<dyn Error>> {
    let fx = Fixture::new()?;
    fs::write(fx.work.join("ffmpeg2pass-0.log"), "stats")?;

    fx.cmd()
        .args(["-f", "f%03d.png", "-b", "1M", "-c", "22", "-n", "10"])
        .assert()
        .success()
        .stderr(contains("Using output filename \"reel-r24-1M-crf22-n10.mp4\""));

    let calls = fx.encode_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("-pass 1"));
    assert!(calls[0].contains("-b:v 1M -crf 22"));
    assert!(calls[0].ends_with("-vframes 10 -y /dev/null"));
    assert!(calls[1].contains("-pass 2"));
    assert!(calls[1].ends_with("reel-r24-1M-crf22-n10.mp4"));

    assert!(!fx.work.join("ffmpeg2pass-0.log").exists());
    Ok(())
}

#[test]
fn keep_temp_leaves_statistics_files() -> Result<(), Box<dyn Error>> {
    let fx = Fixture::new()?;
    fs::write(fx.work.join("ffmpeg2pass-0.log.mbtree"), "tree")?;

    fx.cmd()
        .args(["-f", "f%03d.png", "-b", "1M", "--keep-temp", "-o", "out.mp4"])
        .assert()
        .success();

    assert!(fx.work.join("ffmpeg2pass-0.log.mbtree").exists());
    assert!(fx.encode_calls()[1].ends_with("-y out.mp4"));
    Ok(())
}

#[test]
fn verbose_encode_runs_ffmpeg_attached_to_the_terminal() -> Result<(), Box<dyn Error>> {
    let fx = Fixture::new()?;
    fs::write(fx.work.join("ffmpeg2pass-0.log"), "stats")?;

    fx.cmd()
        .args(["-f", "f%03d.png", "-b", "1M", "-v"])
        .assert()
        .success();

    let calls = fx.encode_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("-pass 1"));
    assert!(calls[1].contains("-pass 2"));
    assert!(!fx.work.join("ffmpeg2pass-0.log").exists());
    Ok(())
}

#[test]
fn failing_first_pass_skips_second_and_exits_with_one() -> Result<(), Box<dyn Error>> {
    let fx = Fixture::new()?;
    fx.write_frames(&["a.png", "b.png"])?;

    fx.cmd()
        .env("SEQENC_STUB_EXIT", "1")
        .args(["-m", "frames.txt", "-b", "1M"])
        .assert()
        .code(1)
        .stderr(contains("pass 1/2"));

    let calls = fx.encode_calls();
    assert_eq!(calls.len(), 1);

    let pattern = input_pattern(&calls[0]).expect("no -i argument recorded");
    assert!(!pattern.parent().unwrap().exists());
    Ok(())
}

#[test]
fn manifest_frames_are_linked_and_cleaned_up() -> Result<(), Box<dyn Error>> {
    let fx = Fixture::new()?;
    fx.write_frames(&["z.jpg", "y.jpg", "x.jpg"])?;

    fx.cmd()
        .args(["-m", "frames.txt", "-c", "20"])
        .assert()
        .success()
        .stderr(contains("Using frame image extension \".jpg\"."));

    let calls = fx.encode_calls();
    assert_eq!(calls.len(), 1);
    assert!(!calls[0].contains("-pass"));

    let pattern = input_pattern(&calls[0]).expect("no -i argument recorded");
    assert_eq!(pattern.file_name().unwrap(), "%05d.jpg");
    assert!(!pattern.parent().unwrap().exists());
    assert!(fx.work.join("z.jpg").exists());
    Ok(())
}

#[test]
fn manifest_with_missing_frame_fails() -> Result<(), Box<dyn Error>> {
    let fx = Fixture::new()?;
    fx.write_frames(&["a.png"])?;
    fs::write(fx.work.join("frames.txt"), "a.png\nghost.png\n")?;

    fx.cmd()
        .args(["-m", "frames.txt"])
        .assert()
        .code(1)
        .stderr(contains("ghost.png"));

    assert!(fx.encode_calls().is_empty());
    Ok(())
}

#[test]
fn version_flag_prints_version() -> Result<(), Box<dyn Error>> {
    Command::cargo_bin("seqenc")?
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn help_explains_bitrate_versus_crf() -> Result<(), Box<dyn Error>> {
    Command::cargo_bin("seqenc")?
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("quality goal").and(contains("bit rate maximum")));
    Ok(())
}

