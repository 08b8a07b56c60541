#![forbid(unsafe_code)]

//! The focus-session state machine.
//!
//! ```text
//!            start(label)                 finish()
//!   Idle ───────────────────► Running ──────────────► Idle
//!    ▲ │ edit_task_label          │ tick                 (+1 tree)
//!    └─┘                          └──► elapsed += 1
//! ```
//!
//! # Invariants
//!
//! 1. At most one run is active; its ticks carry that run's [`CancelToken`].
//! 2. `elapsed_seconds` never decreases while Running and is 0 while Idle.
//! 3. The token is cancelled in the same step as Running→Idle, so a tick
//!    delivered after `finish` is inert.
//! 4. Every successful `finish` appends exactly one ledger entry.
//! 5. The writes of one transition happen inside a batch; effects only ever
//!    see the state before or after it.

use std::cell::RefCell;
use std::fmt;
use std::time::Duration;

use web_time::Instant;

use crate::error::{FocusError, TransitionError, ValidationError};
use crate::ledger::{CompletedEntry, LedgerWriter};
use crate::reactive::{BatchScope, Computed, Observable, ReadSignal};
use crate::ticker::{CancelToken, ScheduledTick, TickSchedule};

/// Whether a focus session is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Running,
}

impl SessionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
        }
    }

    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `HH:MM:SS`, zero padded. Hours keep counting past 24.
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

struct ActiveRun {
    schedule: TickSchedule,
}

/// Owner of the session cells. Readers get [`ReadSignal`]s; only this type
/// writes them.
pub struct FocusSession {
    status: Observable<SessionStatus>,
    elapsed: Observable<u64>,
    task_label: Observable<String>,
    formatted: Computed<String>,
    active: RefCell<Option<ActiveRun>>,
    writer: LedgerWriter,
    interval: Duration,
}

impl FocusSession {
    pub(crate) fn new(writer: LedgerWriter, interval: Duration) -> Self {
        let elapsed = Observable::new(0u64);
        let formatted = Computed::from_observable(&elapsed, |secs| format_elapsed(*secs));
        Self {
            status: Observable::new(SessionStatus::Idle),
            elapsed,
            task_label: Observable::new(String::new()),
            formatted,
            active: RefCell::new(None),
            writer,
            interval,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status.get()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status().is_running()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.get()
    }

    /// The label being edited while Idle, or the locked label while Running.
    #[must_use]
    pub fn task_label(&self) -> String {
        self.task_label.get()
    }

    /// Elapsed time as `HH:MM:SS`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        self.formatted.get()
    }

    #[must_use]
    pub fn status_signal(&self) -> ReadSignal<SessionStatus> {
        self.status.read_only()
    }

    #[must_use]
    pub fn elapsed_signal(&self) -> ReadSignal<u64> {
        self.elapsed.read_only()
    }

    #[must_use]
    pub fn task_label_signal(&self) -> ReadSignal<String> {
        self.task_label.read_only()
    }

    #[must_use]
    pub fn formatted_time_signal(&self) -> Computed<String> {
        self.formatted.clone()
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.interval
    }

    /// Idle → Running with the trimmed `label`; ticks are anchored at `now`.
    pub fn start(&self, label: &str, now: Instant) -> Result<(), FocusError> {
        if self.status.get_untracked().is_running() {
            return Err(TransitionError::AlreadyRunning.into());
        }
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError::EmptyTask.into());
        }

        let token = CancelToken::new();
        {
            let _batch = BatchScope::new();
            *self.active.borrow_mut() = Some(ActiveRun {
                schedule: TickSchedule::new(self.interval, now, token),
            });
            self.elapsed.set(0);
            self.task_label.set(label.to_owned());
            self.status.set(SessionStatus::Running);
        }
        tracing::debug!(target: "forest::session", task = label, "session started");
        Ok(())
    }

    /// Count one tick if a run is active. Returns whether it counted.
    pub fn tick(&self) -> bool {
        let live = self
            .active
            .borrow()
            .as_ref()
            .is_some_and(|run| !run.schedule.token().is_cancelled());
        live && apply_ticks(&self.status, &self.elapsed, 1)
    }

    /// Hand out a single tick bound to the current run, for hosts that drive
    /// the cadence with their own timer. `None` while Idle.
    pub fn schedule_tick(&self) -> Option<ScheduledTick> {
        let token = self.active.borrow().as_ref()?.schedule.token().clone();
        let (status, elapsed) = (self.status.clone(), self.elapsed.clone());
        Some(ScheduledTick::new(token, move || {
            apply_ticks(&status, &elapsed, 1)
        }))
    }

    /// Apply every tick due by `now`; returns how many counted.
    pub fn advance_to(&self, now: Instant) -> u64 {
        let due = match self.active.borrow_mut().as_mut() {
            Some(run) => run.schedule.due_ticks(now),
            None => return 0,
        };
        if due > 0 && apply_ticks(&self.status, &self.elapsed, due) {
            due
        } else {
            0
        }
    }

    /// Time until the next tick is due, or `None` while Idle.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.active
            .borrow()
            .as_ref()
            .map(|run| run.schedule.timeout(now))
    }

    /// Running → Idle, planting one tree for the finished task.
    pub fn finish(&self) -> Result<CompletedEntry, FocusError> {
        if !self.status.get_untracked().is_running() {
            return Err(TransitionError::NotRunning.into());
        }

        let entry = {
            let _batch = BatchScope::new();
            if let Some(run) = self.active.borrow_mut().take() {
                run.schedule.token().cancel();
            }
            let label = self.task_label.get_untracked();
            let elapsed = self.elapsed.get_untracked();
            self.status.set(SessionStatus::Idle);
            self.elapsed.set(0);
            self.task_label.set(String::new());
            tracing::debug!(
                target: "forest::session",
                task = %label,
                elapsed,
                "session finished"
            );
            self.writer.append(label)
        };
        Ok(entry)
    }

    /// Replace the pending label. Only allowed while Idle.
    pub fn edit_task_label(&self, text: &str) -> Result<(), FocusError> {
        if self.status.get_untracked().is_running() {
            return Err(TransitionError::LabelLocked.into());
        }
        self.task_label.set(text.to_owned());
        Ok(())
    }
}

fn apply_ticks(status: &Observable<SessionStatus>, elapsed: &Observable<u64>, count: u64) -> bool {
    if !status.get_untracked().is_running() {
        return false;
    }
    elapsed.update(|secs| *secs = secs.saturating_add(count));
    true
}

impl fmt::Debug for FocusSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusSession")
            .field("status", &self.status.get_untracked())
            .field("elapsed", &self.elapsed.get_untracked())
            .field("task_label", &self.task_label.get_untracked())
            .finish_non_exhaustive()
    }
}
