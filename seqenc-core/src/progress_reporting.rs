//! `FFmpeg` progress handler
//!
//! Consumes the events ffmpeg-sidecar parses from ffmpeg's stderr, drives an
//! `indicatif` bar from the frame counter and forwards ffmpeg's own warnings
//! and errors to the log.

use crate::error::CoreResult;
use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, error, warn};
use std::collections::VecDeque;
use std::time::Duration;

/// Error lines kept for the failure message.
const ERROR_TAIL_LINES: usize = 5;

/// Handler for `FFmpeg` progress events
pub struct FfmpegProgressHandler {
    bar: ProgressBar,
    last_frame: u32,
    error_tail: VecDeque<String>,
}

impl FfmpegProgressHandler {
    /// Creates a handler. With a known frame total the bar shows a ratio,
    /// otherwise a spinner with the running frame count.
    #[must_use]
    pub fn new(label: &str, total_frames: Option<u64>) -> Self {
        let bar = match total_frames {
            Some(total) if total > 0 => {
                let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
                bar.set_style(
                    ProgressStyle::with_template(
                        "  {prefix} [{bar:30}] {pos}/{len} frames {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
                );
                bar
            }
            _ => {
                let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
                bar.set_style(
                    ProgressStyle::with_template("  {prefix} {spinner} {pos} frames {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar.enable_steady_tick(Duration::from_millis(120));
                bar
            }
        };
        bar.set_prefix(label.to_string());

        Self {
            bar,
            last_frame: 0,
            error_tail: VecDeque::with_capacity(ERROR_TAIL_LINES),
        }
    }

    /// Handles an `FFmpeg` event
    pub fn handle_event(&mut self, event: FfmpegEvent) -> CoreResult<()> {
        match event {
            FfmpegEvent::Progress(progress) => self.handle_progress(&progress),
            FfmpegEvent::Log(level, message) => self.handle_log(level, message),
            FfmpegEvent::Error(message) => debug!("ffmpeg output parser: {message}"),
            _ => {}
        }
        Ok(())
    }

    fn handle_progress(&mut self, progress: &FfmpegProgress) {
        self.last_frame = progress.frame;
        self.bar.set_position(u64::from(progress.frame));
        self.bar
            .set_message(format!("{:.1} fps, {:.2}x", progress.fps, progress.speed));
    }

    fn handle_log(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Error | LogLevel::Fatal => {
                self.bar.suspend(|| error!("ffmpeg: {message}"));
                if self.error_tail.len() == ERROR_TAIL_LINES {
                    self.error_tail.pop_front();
                }
                self.error_tail.push_back(message);
            }
            LogLevel::Warning => self.bar.suspend(|| warn!("ffmpeg: {message}")),
            _ => debug!("ffmpeg: {message}"),
        }
    }

    /// Last frame number ffmpeg reported.
    #[must_use]
    pub fn frames_encoded(&self) -> u32 {
        self.last_frame
    }

    /// Recent ffmpeg error lines joined for an error message.
    #[must_use]
    pub fn error_summary(&self) -> String {
        if self.error_tail.is_empty() {
            "no error output captured".to_string()
        } else {
            self.error_tail.iter().cloned().collect::<Vec<_>>().join("; ")
        }
    }

    /// Removes the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(frame: u32) -> FfmpegProgress {
        FfmpegProgress {
            frame,
            fps: 12.0,
            q: 23.0,
            size_kb: 100,
            time: "00:00:01.00".to_string(),
            bitrate_kbps: 800.0,
            speed: 0.5,
            raw_log_message: String::new(),
        }
    }

    #[test]
    fn tracks_latest_frame() {
        let mut handler = FfmpegProgressHandler::new("pass 1/2", Some(48));
        handler.handle_event(FfmpegEvent::Progress(progress(10))).unwrap();
        handler.handle_event(FfmpegEvent::Progress(progress(24))).unwrap();
        handler.finish();

        assert_eq!(handler.frames_encoded(), 24);
    }

    #[test]
    fn keeps_only_recent_error_lines() {
        let mut handler = FfmpegProgressHandler::new("single pass", None);
        assert_eq!(handler.error_summary(), "no error output captured");

        for i in 0..8 {
            handler
                .handle_event(FfmpegEvent::Log(LogLevel::Error, format!("bad {i}")))
                .unwrap();
        }
        handler
            .handle_event(FfmpegEvent::Log(LogLevel::Warning, "meh".to_string()))
            .unwrap();
        handler.finish();

        assert_eq!(handler.error_summary(), "bad 3; bad 4; bad 5; bad 6; bad 7");
    }
}
