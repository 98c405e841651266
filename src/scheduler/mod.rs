//! Throttled cooperative scheduling for the render and detection loops
//!
//! Both loops are driven by a single external clock signal: the host pumps
//! one `tick` per display-synchronized clock tick, and the scheduler decides
//! per loop whether enough time has elapsed for the work to run. Skipped
//! ticks never kill a loop; only the work is throttled. Cancellation via
//! `stop` is idempotent and effective within one tick.

use crate::config::SchedulerConfig;
use crate::types::TimestampMs;
use std::sync::Arc;
use std::time::Instant;

/// Monotonic millisecond clock.
///
/// All pipeline timestamps derive from one clock instance to guarantee
/// monotonic ordering. Tests substitute a manually advanced clock.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> TimestampMs;
}

/// Instant-backed monotonic clock.
///
/// Time zero is the creation instant; share the same timebase between
/// components by cloning or via `from_instant`.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Arc<Instant>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Arc::new(Instant::now()),
        }
    }

    /// Create a clock from an existing start instant to share a timebase.
    pub fn from_instant(start: Instant) -> Self {
        Self {
            start: Arc::new(start),
        }
    }

    pub fn start_instant(&self) -> Instant {
        *self.start
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now_ms(&self) -> TimestampMs {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Per-loop throttle record, mutated only by its owning loop.
///
/// `last_run_ms` is monotonically non-decreasing; the first tick after a
/// reset always runs.
#[derive(Debug, Clone)]
pub struct ThrottleState {
    last_run_ms: Option<TimestampMs>,
    min_interval_ms: f64,
}

impl ThrottleState {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            last_run_ms: None,
            min_interval_ms,
        }
    }

    /// Whether enough time has elapsed for the loop's work to run.
    pub fn is_due(&self, now_ms: TimestampMs) -> bool {
        match self.last_run_ms {
            None => true,
            Some(last) => now_ms - last >= self.min_interval_ms,
        }
    }

    /// Record an executed run. Clamped so `last_run_ms` never decreases.
    pub fn mark_run(&mut self, now_ms: TimestampMs) {
        self.last_run_ms = Some(match self.last_run_ms {
            Some(last) => last.max(now_ms),
            None => now_ms,
        });
    }

    pub fn reset(&mut self) {
        self.last_run_ms = None;
    }

    pub fn last_run_ms(&self) -> Option<TimestampMs> {
        self.last_run_ms
    }

    pub fn min_interval_ms(&self) -> f64 {
        self.min_interval_ms
    }
}

/// Returned by a work function to keep its loop alive or halt the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCommand {
    Continue,
    Stop,
}

/// The injected work functions for the two loops.
///
/// Work is dependency-injected rather than self-rescheduling closures so
/// cancellation and fake-clock testing stay possible.
pub trait SchedulerDriver {
    fn render_tick(&mut self, now_ms: TimestampMs) -> LoopCommand;
    fn detect_tick(&mut self, now_ms: TimestampMs) -> LoopCommand;
}

/// Drives the render and detection loops against one clock signal.
pub struct Scheduler {
    render: ThrottleState,
    detect: ThrottleState,
    running: bool,
    detect_in_flight: bool,
}

impl Scheduler {
    pub fn new(config: &SchedulerConfig) -> Self {
        Self {
            render: ThrottleState::new(config.render_interval_ms),
            detect: ThrottleState::new(config.detect_interval_ms),
            running: false,
            detect_in_flight: false,
        }
    }

    /// Begin (or restart) both loops. Throttle state resets so the first
    /// tick of a session always executes work.
    pub fn start(&mut self) {
        self.render.reset();
        self.detect.reset();
        self.detect_in_flight = false;
        self.running = true;
        log::debug!(
            "scheduler started (render {:.1}ms, detect {:.1}ms)",
            self.render.min_interval_ms(),
            self.detect.min_interval_ms()
        );
    }

    /// Cancel both loops. Safe to call repeatedly or before `start`; no work
    /// function executes after this returns.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::debug!("scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Process one clock tick: run each loop's work if its interval has
    /// elapsed. Returns whether the scheduler is still running.
    ///
    /// Render runs before detection when both are due; each tick body is
    /// atomic, and the in-flight guard keeps detection ticks from nesting.
    pub fn tick(&mut self, now_ms: TimestampMs, driver: &mut dyn SchedulerDriver) -> bool {
        if !self.running {
            return false;
        }

        if self.render.is_due(now_ms) {
            self.render.mark_run(now_ms);
            if driver.render_tick(now_ms) == LoopCommand::Stop {
                self.stop();
                return false;
            }
        }

        if self.detect.is_due(now_ms) && !self.detect_in_flight {
            self.detect.mark_run(now_ms);
            self.detect_in_flight = true;
            let command = driver.detect_tick(now_ms);
            self.detect_in_flight = false;
            if command == LoopCommand::Stop {
                self.stop();
            }
        }

        self.running
    }
}
