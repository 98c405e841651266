//! Scheduler throttling and cancellation tests
//!
//! Drives the scheduler with a manually advanced clock so every property
//! is deterministic: throttle windows, starvation bounds, idempotent stop,
//! and stop-within-one-tick cancellation.

use framegate::config::SchedulerConfig;
use framegate::scheduler::{Clock, LoopCommand, Scheduler, SchedulerDriver};
use framegate::testing::ManualClock;

struct CountingDriver {
    render_runs: Vec<f64>,
    detect_runs: Vec<f64>,
    render_command: LoopCommand,
    detect_command: LoopCommand,
}

impl CountingDriver {
    fn new() -> Self {
        Self {
            render_runs: Vec::new(),
            detect_runs: Vec::new(),
            render_command: LoopCommand::Continue,
            detect_command: LoopCommand::Continue,
        }
    }
}

impl SchedulerDriver for CountingDriver {
    fn render_tick(&mut self, now_ms: f64) -> LoopCommand {
        self.render_runs.push(now_ms);
        self.render_command
    }

    fn detect_tick(&mut self, now_ms: f64) -> LoopCommand {
        self.detect_runs.push(now_ms);
        self.detect_command
    }
}

fn test_config() -> SchedulerConfig {
    SchedulerConfig {
        render_interval_ms: 33.0,
        detect_interval_ms: 100.0,
    }
}

/// Pump ticks in 10ms clock steps until `until_ms`.
fn pump(scheduler: &mut Scheduler, clock: &ManualClock, driver: &mut CountingDriver, until_ms: f64) {
    while clock.now_ms() <= until_ms {
        scheduler.tick(clock.now_ms(), driver);
        clock.advance(10.0);
    }
}

#[test]
fn test_render_throttle_window_bounds() {
    let clock = ManualClock::new(0.0);
    let mut scheduler = Scheduler::new(&test_config());
    let mut driver = CountingDriver::new();

    scheduler.start();
    pump(&mut scheduler, &clock, &mut driver, 660.0);

    assert!(!driver.render_runs.is_empty());
    for pair in driver.render_runs.windows(2) {
        let gap = pair[1] - pair[0];
        // At most once per 33ms window, at least once per 66ms window.
        assert!(gap >= 33.0, "ran twice within a 33ms window (gap {gap})");
        assert!(gap <= 66.0, "starved for {gap}ms");
    }
}

#[test]
fn test_first_tick_runs_immediately() {
    let clock = ManualClock::new(0.0);
    let mut scheduler = Scheduler::new(&test_config());
    let mut driver = CountingDriver::new();

    scheduler.start();
    scheduler.tick(clock.now_ms(), &mut driver);

    assert_eq!(driver.render_runs, vec![0.0]);
    assert_eq!(driver.detect_runs, vec![0.0]);
}

#[test]
fn test_detection_runs_slower_than_render() {
    let clock = ManualClock::new(0.0);
    let mut scheduler = Scheduler::new(&test_config());
    let mut driver = CountingDriver::new();

    scheduler.start();
    pump(&mut scheduler, &clock, &mut driver, 1000.0);

    for pair in driver.detect_runs.windows(2) {
        assert!(pair[1] - pair[0] >= 100.0);
    }
    assert!(driver.render_runs.len() > driver.detect_runs.len());
}

#[test]
fn test_stop_halts_all_work() {
    let clock = ManualClock::new(0.0);
    let mut scheduler = Scheduler::new(&test_config());
    let mut driver = CountingDriver::new();

    scheduler.start();
    pump(&mut scheduler, &clock, &mut driver, 200.0);
    scheduler.stop();

    let render_before = driver.render_runs.len();
    let detect_before = driver.detect_runs.len();

    // Advance arbitrarily far: zero further work-function calls.
    clock.advance(1_000_000.0);
    for _ in 0..100 {
        assert!(!scheduler.tick(clock.now_ms(), &mut driver));
        clock.advance(10.0);
    }
    assert_eq!(driver.render_runs.len(), render_before);
    assert_eq!(driver.detect_runs.len(), detect_before);
}

#[test]
fn test_stop_is_idempotent() {
    let mut scheduler = Scheduler::new(&test_config());
    scheduler.start();
    scheduler.stop();
    scheduler.stop();
    assert!(!scheduler.is_running());
}

#[test]
fn test_stop_command_from_detect_tick() {
    let clock = ManualClock::new(0.0);
    let mut scheduler = Scheduler::new(&test_config());
    let mut driver = CountingDriver::new();
    driver.detect_command = LoopCommand::Stop;

    scheduler.start();
    assert!(!scheduler.tick(clock.now_ms(), &mut driver));
    assert_eq!(driver.detect_runs.len(), 1);

    clock.advance(500.0);
    scheduler.tick(clock.now_ms(), &mut driver);
    assert_eq!(driver.detect_runs.len(), 1);
    assert_eq!(driver.render_runs.len(), 1);
}

#[test]
fn test_stop_command_from_render_skips_detection() {
    let clock = ManualClock::new(0.0);
    let mut scheduler = Scheduler::new(&test_config());
    let mut driver = CountingDriver::new();
    driver.render_command = LoopCommand::Stop;

    scheduler.start();
    assert!(!scheduler.tick(clock.now_ms(), &mut driver));
    assert_eq!(driver.render_runs.len(), 1);
    // Cancellation is effective within the same tick.
    assert!(driver.detect_runs.is_empty());
}

#[test]
fn test_restart_resets_throttle() {
    let clock = ManualClock::new(0.0);
    let mut scheduler = Scheduler::new(&test_config());
    let mut driver = CountingDriver::new();

    scheduler.start();
    scheduler.tick(clock.now_ms(), &mut driver);
    scheduler.stop();

    // Restart mid-interval: the first tick of the new session runs.
    clock.advance(5.0);
    scheduler.start();
    scheduler.tick(clock.now_ms(), &mut driver);
    assert_eq!(driver.render_runs.len(), 2);
}
