//! Fixed-rate tick scheduling
//!
//! Provides portable tick pacing that works both by polling and on top of
//! `embassy-time`. The scheduler never owns the task: it is borrowed
//! exclusively for each poll, so ticks cannot overlap.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant, Timer};
use log::debug;

use crate::config::TickTimings;

/// Whether a periodic task wants to keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskControl {
    Continue,
    Stop,
}

/// Work invoked by a [`FixedRateScheduler`] once per period
pub trait PeriodicTask {
    fn run(&mut self) -> TaskControl;
}

/// Cancellation flag shared between a scheduler and its handles.
///
/// Uses a critical section, so a handle may cancel from an interrupt or
/// another executor.
pub struct CancelFlag {
    cancelled: Mutex<Cell<bool>>,
}

impl CancelFlag {
    pub const fn new() -> Self {
        Self {
            cancelled: Mutex::new(Cell::new(false)),
        }
    }

    pub fn cancel(&self) {
        critical_section::with(|cs| self.cancelled.borrow(cs).set(true));
    }

    pub fn is_cancelled(&self) -> bool {
        critical_section::with(|cs| self.cancelled.borrow(cs).get())
    }
}

impl Default for CancelFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to cancel a running schedule
///
/// This is a lightweight reference that can be copied and passed around.
#[derive(Clone, Copy)]
pub struct ScheduleHandle<'a> {
    flag: &'a CancelFlag,
}

impl ScheduleHandle<'_> {
    /// Stop the schedule. The current tick, if any, runs to completion.
    pub fn cancel(&self) {
        self.flag.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.is_cancelled()
    }
}

/// Result of a scheduler poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollResult {
    /// Deadline not reached, nothing ran
    Pending {
        next_deadline: Instant,
        sleep_duration: Duration,
    },
    /// The task ran once
    Ran {
        next_deadline: Instant,
        sleep_duration: Duration,
    },
    /// Cancelled, or the task asked to stop
    Finished,
}

impl PollResult {
    /// Deadline to wait for, unless finished
    pub const fn next_deadline(&self) -> Option<Instant> {
        match self {
            Self::Pending { next_deadline, .. } | Self::Ran { next_deadline, .. } => {
                Some(*next_deadline)
            }
            Self::Finished => None,
        }
    }
}

/// Fixed-rate scheduler
///
/// Runs a task every `period`, starting `initial_delay` after the first
/// poll. If the caller falls more than two periods behind, the backlog is
/// skipped instead of run in a burst.
///
/// # Usage
///
/// ```ignore
/// let flag = CancelFlag::new();
/// let mut scheduler = FixedRateScheduler::from_timings(&flag, &config.timings);
///
/// loop {
///     match scheduler.poll(Instant::now(), &mut session) {
///         PollResult::Finished => break,
///         result => sleep_until(result.next_deadline()),
///     }
/// }
/// ```
pub struct FixedRateScheduler<'a> {
    cancel: &'a CancelFlag,
    initial_delay: Duration,
    period: Duration,
    next_run: Option<Instant>,
    finished: bool,
}

impl<'a> FixedRateScheduler<'a> {
    pub const fn new(cancel: &'a CancelFlag, initial_delay: Duration, period: Duration) -> Self {
        Self {
            cancel,
            initial_delay,
            period,
            next_run: None,
            finished: false,
        }
    }

    pub const fn from_timings(cancel: &'a CancelFlag, timings: &TickTimings) -> Self {
        Self::new(cancel, timings.initial_delay, timings.period)
    }

    /// Get a handle that cancels this schedule.
    pub const fn handle(&self) -> ScheduleHandle<'a> {
        ScheduleHandle { flag: self.cancel }
    }

    pub fn is_finished(&self) -> bool {
        self.finished || self.cancel.is_cancelled()
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Run the task if its deadline has been reached.
    ///
    /// The first poll anchors the schedule at `now + initial_delay`.
    pub fn poll<T: PeriodicTask>(&mut self, now: Instant, task: &mut T) -> PollResult {
        if self.is_finished() {
            return PollResult::Finished;
        }

        let deadline = *self.next_run.get_or_insert(now + self.initial_delay);
        if now < deadline {
            return PollResult::Pending {
                next_deadline: deadline,
                sleep_duration: deadline - now,
            };
        }

        // Drift correction: if we've fallen too far behind, reset to now
        let deadline = if now > deadline + self.period + self.period {
            now
        } else {
            deadline
        };

        if task.run() == TaskControl::Stop {
            debug!("periodic task finished");
            self.finished = true;
            self.cancel.cancel();
            return PollResult::Finished;
        }

        let next_deadline = deadline + self.period;
        self.next_run = Some(next_deadline);
        PollResult::Ran {
            next_deadline,
            sleep_duration: next_deadline.saturating_duration_since(now),
        }
    }

    /// Drive the task with `embassy-time` until the schedule finishes.
    pub async fn run<T: PeriodicTask>(&mut self, task: &mut T) {
        loop {
            match self.poll(Instant::now(), task).next_deadline() {
                Some(deadline) => Timer::at(deadline).await,
                None => return,
            }
        }
    }
}
