#![forbid(unsafe_code)]

//! Tick cadence for a running focus session.
//!
//! The session owns a [`CancelToken`] per run. Every tick source (the
//! schedule driven by the host loop, or a single [`ScheduledTick`] handed to
//! a host timer) checks the token before it is allowed to count, so a tick
//! that was already in flight when the session finished is inert.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

/// Cadence used when the configuration does not override it.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Shared cancellation flag for the ticks of one session run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Fixed-interval schedule anchored at the moment the session started.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    interval: Duration,
    last_tick: Instant,
    token: CancelToken,
}

impl TickSchedule {
    /// A zero `interval` is raised to one millisecond.
    #[must_use]
    pub fn new(interval: Duration, started_at: Instant, token: CancelToken) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            last_tick: started_at,
            token,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Consume every whole interval elapsed by `now`; returns how many.
    ///
    /// Always zero once the token is cancelled.
    pub fn due_ticks(&mut self, now: Instant) -> u64 {
        if self.token.is_cancelled() {
            return 0;
        }
        let elapsed = now.saturating_duration_since(self.last_tick);
        let due = elapsed.as_nanos() / self.interval.as_nanos();
        let due = u64::try_from(due).unwrap_or(u64::MAX);
        if due > 0 {
            let step = u32::try_from(due).unwrap_or(u32::MAX);
            self.last_tick += self.interval.saturating_mul(step);
        }
        due
    }

    /// How long the host may sleep before the next tick is due.
    #[must_use]
    pub fn timeout(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_tick))
    }
}

/// A single pending tick, bound to the run that scheduled it.
///
/// Produced by [`FocusSession::schedule_tick`](crate::session::FocusSession::schedule_tick).
#[must_use = "a scheduled tick does nothing until fired"]
pub struct ScheduledTick {
    token: CancelToken,
    apply: Box<dyn FnOnce() -> bool>,
}

impl ScheduledTick {
    pub(crate) fn new(token: CancelToken, apply: impl FnOnce() -> bool + 'static) -> Self {
        Self {
            token,
            apply: Box::new(apply),
        }
    }

    /// Whether the run this tick belongs to has ended.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Deliver the tick. Returns `true` if it counted.
    pub fn fire(self) -> bool {
        if self.token.is_cancelled() {
            tracing::trace!(target: "forest::session", "stale tick ignored");
            return false;
        }
        (self.apply)()
    }
}

impl std::fmt::Debug for ScheduledTick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTick")
            .field("stale", &self.is_stale())
            .finish()
    }
}
