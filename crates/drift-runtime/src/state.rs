//! Benchmark phases and the timers that drive them

use serde::Serialize;

/// Where a run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchPhase {
    /// Startup transients; ticks are not recorded
    Warmup,
    /// Ticks are appended to the frame record
    Recording,
    /// Observation window closed (or the run was stopped); no more ticks
    Finished,
}

impl BenchPhase {
    /// Phase implied by accumulated run time
    pub fn at(run_time: f64, warmup: f64, observation_window: f64) -> Self {
        if run_time >= observation_window {
            BenchPhase::Finished
        } else if run_time > warmup {
            BenchPhase::Recording
        } else {
            BenchPhase::Warmup
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BenchPhase::Warmup => "warmup",
            BenchPhase::Recording => "recording",
            BenchPhase::Finished => "finished",
        }
    }
}

/// Cumulative timers, each advanced by measured tick durations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickTimers {
    pub spawn: f64,
    pub cleanup: f64,
    pub run: f64,
}

impl TickTimers {
    pub fn advance(&mut self, dt: f64) {
        self.spawn += dt;
        self.cleanup += dt;
        self.run += dt;
    }

    /// Consume one spawn interval if the timer has reached it
    pub fn take_spawn(&mut self, interval: f64) -> Option<f64> {
        if self.spawn >= interval {
            self.spawn -= interval;
            Some(interval)
        } else {
            None
        }
    }

    /// Reset the cleanup timer if it has reached the cadence
    pub fn take_cleanup(&mut self, interval: f64) -> bool {
        if self.cleanup >= interval {
            self.cleanup = 0.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_boundaries() {
        assert_eq!(BenchPhase::at(0.0, 1.0, 3.0), BenchPhase::Warmup);
        assert_eq!(BenchPhase::at(1.0, 1.0, 3.0), BenchPhase::Warmup);
        assert_eq!(BenchPhase::at(1.25, 1.0, 3.0), BenchPhase::Recording);
        assert_eq!(BenchPhase::at(3.0, 1.0, 3.0), BenchPhase::Finished);
    }

    #[test]
    fn zero_window_is_finished_from_the_start() {
        assert_eq!(BenchPhase::at(0.0, 5.0, 0.0), BenchPhase::Finished);
    }

    #[test]
    fn spawn_timer_keeps_remainder() {
        let mut timers = TickTimers::default();
        timers.advance(0.375);
        assert_eq!(timers.take_spawn(0.25), Some(0.25));
        assert_eq!(timers.spawn, 0.125);
        assert_eq!(timers.take_spawn(0.25), None);
    }

    #[test]
    fn cleanup_timer_resets_to_zero() {
        let mut timers = TickTimers::default();
        timers.advance(1.5);
        assert!(timers.take_cleanup(1.0));
        assert_eq!(timers.cleanup, 0.0);
        assert!(!timers.take_cleanup(1.0));
        assert_eq!(timers.run, 1.5);
    }
}
