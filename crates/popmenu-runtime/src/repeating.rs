#![forbid(unsafe_code)]

//! Cancellable fixed-period repeating task.
//!
//! A [`RepeatingTask`] is a deadline tracker the owner polls from its tick
//! handler. It never runs code on its own; the owner decides what a fire
//! does. Cancelling is dropping the task (or calling
//! [`cancel`](RepeatingTask::cancel) on a slot), so a cancelled task can
//! never fire again.
//!
//! # Invariants
//!
//! 1. The first fire happens one full period after `start`.
//! 2. `poll` fires at most once per call. When the owner falls behind by
//!    several periods, the missed fires are coalesced and the next deadline
//!    moves to the first period boundary after `now`.
//! 3. Deadlines stay aligned to `start + k * period`.

use web_time::{Duration, Instant};

/// A repeating deadline with a fixed period.
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    period: Duration,
    next_due: Instant,
    fired: u64,
}

impl RepeatingTask {
    /// Schedule a task whose first fire is due at `start + period`.
    ///
    /// A zero period is clamped to one millisecond.
    #[must_use]
    pub fn start(period: Duration, start: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: start + period,
            fired: 0,
        }
    }

    /// Fire if due. Returns `true` when the task fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        let late = now.duration_since(self.next_due);
        let skipped = late.as_nanos() / self.period.as_nanos().max(1);
        let advance = u32::try_from(skipped + 1).unwrap_or(u32::MAX);
        self.next_due += self.period.saturating_mul(advance);
        self.fired += 1;
        true
    }

    #[inline]
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[inline]
    #[must_use]
    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Number of times the task has fired.
    #[inline]
    #[must_use]
    pub fn fire_count(&self) -> u64 {
        self.fired
    }
}

/// Owner-side slot holding at most one running task.
#[derive(Debug, Clone, Default)]
pub struct TaskSlot {
    task: Option<RepeatingTask>,
}

impl TaskSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a task unless one is already running. Returns `true` if started.
    pub fn start_if_idle(&mut self, period: Duration, now: Instant) -> bool {
        if self.task.is_some() {
            return false;
        }
        self.task = Some(RepeatingTask::start(period, now));
        true
    }

    /// Stop the running task, if any. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        self.task.take().is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Poll the running task.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.task.as_mut().is_some_and(|task| task.poll(now))
    }

    #[must_use]
    pub fn task(&self) -> Option<&RepeatingTask> {
        self.task.as_ref()
    }
}
