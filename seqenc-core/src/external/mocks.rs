// seqenc-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and when the "test-mocks" feature is enabled.

use super::*;
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::RefCell;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::rc::Rc;

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let events = self.events_to_emit.borrow().clone();
        for event in events {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// One recorded spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedCall {
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    /// Spawned through `spawn_inherited` (verbose mode).
    pub inherited: bool,
}

/// Mock implementation of FfmpegSpawner.
///
/// Every spawn is recorded. Outcomes queued with `push_*` are consumed in
/// order; once the queue is empty, spawns succeed with no events.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    outcomes: Rc<RefCell<Vec<CoreResult<MockFfmpegProcess>>>>,
    received: Rc<RefCell<Vec<ReceivedCall>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    /// Queues a successful run that emits `events`.
    pub fn push_success(&self, events: Vec<FfmpegEvent>) {
        self.outcomes.borrow_mut().push(Ok(MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: ExitStatus::from_raw(0),
        }));
    }

    /// Queues a run that exits with `exit_code`.
    pub fn push_exit_error(&self, events: Vec<FfmpegEvent>, exit_code: i32) {
        self.outcomes.borrow_mut().push(Ok(MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            // Raw wait status: the exit code lives in the second byte.
            exit_status: ExitStatus::from_raw(exit_code << 8),
        }));
    }

    pub fn push_spawn_error(&self, error: CoreError) {
        self.outcomes.borrow_mut().push(Err(error));
    }

    /// Arguments of every spawned command, in spawn order.
    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received
            .borrow()
            .iter()
            .map(|call| call.args.clone())
            .collect()
    }

    /// Full record of every spawn, in spawn order.
    pub fn get_received(&self) -> Vec<ReceivedCall> {
        self.received.borrow().clone()
    }

    fn record(&self, mut cmd: FfmpegCommand, inherited: bool) -> CoreResult<MockFfmpegProcess> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        let current_dir = cmd.as_inner_mut().get_current_dir().map(PathBuf::from);
        log::debug!("MockFfmpegSpawner received: {:?}", args);
        self.received.borrow_mut().push(ReceivedCall {
            args,
            current_dir,
            inherited,
        });

        let mut outcomes = self.outcomes.borrow_mut();
        if outcomes.is_empty() {
            Ok(MockFfmpegProcess {
                events_to_emit: Rc::new(RefCell::new(Vec::new())),
                exit_status: ExitStatus::from_raw(0),
            })
        } else {
            outcomes.remove(0)
        }
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        self.record(cmd, false)
    }

    fn spawn_inherited(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        self.record(cmd, true)
    }
}
