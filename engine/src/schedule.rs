//! Fixed-rate tick scheduling for hosts that drive the engine from a
//! variable-rate display loop.

use std::time::Duration;

/// Simulation rate the gameplay constants are tuned for.
pub const TICKS_PER_SECOND: u32 = 60;

const MAX_CATCH_UP_TICKS: u32 = 4;

/// Converts elapsed wall-clock time into a whole number of due ticks.
#[derive(Clone, Debug)]
pub struct TickScheduler {
    step: Duration,
    accumulator: Duration,
    max_catch_up: u32,
}

impl TickScheduler {
    /// Creates a scheduler emitting `ticks_per_second` ticks per second.
    ///
    /// A zero rate is treated as one tick per second.
    #[must_use]
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / ticks_per_second.max(1),
            accumulator: Duration::ZERO,
            max_catch_up: MAX_CATCH_UP_TICKS,
        }
    }

    /// Duration of a single tick.
    #[must_use]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Accumulates `elapsed` and returns how many ticks are due.
    ///
    /// After a long stall at most a handful of ticks are returned and the
    /// remaining backlog is discarded, so the simulation never spirals.
    pub fn due(&mut self, elapsed: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(elapsed);

        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
            if ticks == self.max_catch_up {
                self.accumulator = Duration::ZERO;
                break;
            }
        }
        ticks
    }

    /// Discards any accumulated time, e.g. after the loop was paused.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(TICKS_PER_SECOND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_partial_steps() {
        let mut scheduler = TickScheduler::new(10);
        assert_eq!(scheduler.due(Duration::from_millis(60)), 0);
        assert_eq!(scheduler.due(Duration::from_millis(60)), 1);
        assert_eq!(scheduler.due(Duration::from_millis(180)), 2);
    }

    #[test]
    fn long_stalls_are_capped() {
        let mut scheduler = TickScheduler::new(60);
        assert_eq!(scheduler.due(Duration::from_secs(5)), MAX_CATCH_UP_TICKS);
        assert_eq!(scheduler.due(Duration::ZERO), 0, "backlog is dropped");
    }

    #[test]
    fn zero_rate_does_not_divide_by_zero() {
        assert_eq!(TickScheduler::new(0).step(), Duration::from_secs(1));
    }
}
