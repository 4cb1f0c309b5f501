//! The benchmark loop
//!
//! Drives a [`RuntimeSystem`] tick by tick, timing each tick with a
//! [`TickClock`]. Tick durations are whatever the tick actually took; they feed
//! the next tick's integration step and the spawn/cleanup/run timers.
//! Ticks after the warm-up are recorded until the run timer reaches the
//! observation window.

use crate::clock::{TickClock, TickTiming};
use crate::report::{BenchReport, Termination};
use crate::state::{BenchPhase, TickTimers};
use crate::stats::{FrameRecord, FrameSample};
use crate::system::{RuntimeSystem, TickPlan};
use drift_core::{BenchConfig, DriftError, RenderInstance, Result};
use tracing::{debug, error, info, warn};

/// Consumes the per-tick snapshot. Must not outlive the call with it.
pub trait Renderer {
    fn render(&mut self, instances: &[RenderInstance]) -> Result<()>;

    fn name(&self) -> &str {
        "renderer"
    }
}

/// The window collaborator's "close requested" flag, sampled once per tick
pub trait CloseSignal {
    fn close_requested(&mut self) -> bool;
}

/// A window that is never closed
pub struct NeverClose;

impl CloseSignal for NeverClose {
    fn close_requested(&mut self) -> bool {
        false
    }
}

/// Requests close once a fixed number of ticks have started
pub struct TickLimit {
    remaining: u64,
}

impl TickLimit {
    pub fn new(max_ticks: u64) -> Self {
        Self {
            remaining: max_ticks,
        }
    }
}

impl CloseSignal for TickLimit {
    fn close_requested(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }
}

/// Harness timing parameters, fixed for a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarnessConfig {
    pub warmup: f64,
    pub observation_window: f64,
    pub spawn_interval: f64,
    pub cleanup_interval: f64,
    pub print_frames: bool,
}

impl From<&BenchConfig> for HarnessConfig {
    fn from(config: &BenchConfig) -> Self {
        Self {
            warmup: config.warmup,
            observation_window: config.observation_window,
            spawn_interval: config.spawn_interval,
            cleanup_interval: config.cleanup_interval,
            print_frames: config.print_frames,
        }
    }
}

pub struct BenchHarness {
    config: HarnessConfig,
    timers: TickTimers,
    phase: BenchPhase,
    record: FrameRecord,
    ticks: u64,
    last_duration: f64,
}

impl BenchHarness {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            timers: TickTimers::default(),
            phase: BenchPhase::at(0.0, config.warmup, config.observation_window),
            record: FrameRecord::new(),
            ticks: 0,
            last_duration: 0.0,
        }
    }

    pub fn phase(&self) -> BenchPhase {
        self.phase
    }

    pub fn timers(&self) -> &TickTimers {
        &self.timers
    }

    pub fn record(&self) -> &FrameRecord {
        &self.record
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run to completion. Failures inside the loop end the run but still
    /// produce a report over the samples recorded so far.
    pub fn run<S: RuntimeSystem + ?Sized>(
        &mut self,
        system: &mut S,
        clock: &mut dyn TickClock,
        mut renderer: Option<&mut (dyn Renderer + '_)>,
        close: &mut dyn CloseSignal,
    ) -> BenchReport {
        info!(
            system = system.name(),
            warmup = self.config.warmup,
            window = self.config.observation_window,
            "benchmark starting"
        );

        let termination = match system.initialize() {
            Err(e) => {
                error!(error = %e, "system failed to initialize");
                Termination::Failed {
                    message: e.to_string(),
                }
            }
            Ok(()) => loop {
                if self.timers.run >= self.config.observation_window {
                    break Termination::Completed;
                }
                if close.close_requested() {
                    info!(ticks = self.ticks, "close requested");
                    break Termination::CloseRequested;
                }
                if let Err(e) = self.tick(system, clock, renderer.as_deref_mut()) {
                    error!(ticks = self.ticks, error = %e, "tick failed; ending run");
                    break Termination::Failed {
                        message: e.to_string(),
                    };
                }
            },
        };

        self.finish();
        if let Err(e) = system.shutdown() {
            warn!(error = %e, "system shutdown failed");
        }
        self.report(system.name(), termination)
    }

    /// One tick: update, render, then timing bookkeeping
    pub fn tick<S: RuntimeSystem + ?Sized>(
        &mut self,
        system: &mut S,
        clock: &mut dyn TickClock,
        renderer: Option<&mut (dyn Renderer + '_)>,
    ) -> Result<()> {
        clock.begin_tick();

        let plan = TickPlan {
            dt: self.last_duration,
            spawn_secs: self.timers.take_spawn(self.config.spawn_interval),
            advance_floor: self.timers.take_cleanup(self.config.cleanup_interval),
        };
        system.update(&plan)?;

        let rendered = match renderer {
            Some(r) => {
                clock.begin_render();
                let result = r.render(system.render_instances());
                clock.end_render();
                result
            }
            None => Ok(()),
        };

        let timing = clock.end_tick();
        self.ticks += 1;
        rendered?;
        self.account(timing)
    }

    fn account(&mut self, timing: TickTiming) -> Result<()> {
        let duration = timing.frame;
        if !duration.is_finite() || duration < 0.0 {
            return Err(DriftError::RuntimeError(format!(
                "clock reported an invalid tick duration: {duration}"
            )));
        }

        self.last_duration = duration;
        self.timers.advance(duration);

        if self.timers.run > self.config.warmup {
            self.record.push(FrameSample {
                duration,
                render: timing.render,
            });
        }

        let phase = BenchPhase::at(
            self.timers.run,
            self.config.warmup,
            self.config.observation_window,
        );
        if phase != self.phase {
            debug!(
                from = self.phase.as_str(),
                to = phase.as_str(),
                run_time = self.timers.run,
                "phase change"
            );
            self.phase = phase;
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.phase = BenchPhase::Finished;
        self.record.close();
        info!(
            ticks = self.ticks,
            samples = self.record.len(),
            discarded = self.record.discarded(),
            "benchmark finished"
        );
    }

    fn report(&self, system: &str, termination: Termination) -> BenchReport {
        BenchReport {
            system: system.to_string(),
            ticks: self.ticks,
            run_time_secs: self.timers.run,
            discarded_samples: self.record.discarded(),
            termination,
            stats: self.record.stats(),
            frame_rates: self.config.print_frames.then(|| self.record.frame_rates()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ScriptedClock;

    /// Records every plan it is handed
    #[derive(Default)]
    struct PlanLog {
        plans: Vec<TickPlan>,
        fail_on: Option<usize>,
        instances: Vec<RenderInstance>,
        shut_down: bool,
    }

    impl RuntimeSystem for PlanLog {
        fn initialize(&mut self) -> Result<()> {
            Ok(())
        }

        fn update(&mut self, plan: &TickPlan) -> Result<()> {
            if self.fail_on == Some(self.plans.len()) {
                return Err(DriftError::RuntimeError("scripted failure".into()));
            }
            self.plans.push(*plan);
            Ok(())
        }

        fn render_instances(&self) -> &[RenderInstance] {
            &self.instances
        }

        fn shutdown(&mut self) -> Result<()> {
            self.shut_down = true;
            Ok(())
        }

        fn name(&self) -> &str {
            "plan-log"
        }
    }

    struct CountingRenderer {
        calls: usize,
        fail_at: Option<usize>,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, _instances: &[RenderInstance]) -> Result<()> {
            self.calls += 1;
            if self.fail_at == Some(self.calls) {
                return Err(DriftError::RenderError("device lost".into()));
            }
            Ok(())
        }
    }

    fn config(warmup: f64, window: f64) -> HarnessConfig {
        HarnessConfig {
            warmup,
            observation_window: window,
            spawn_interval: 0.5,
            cleanup_interval: 1.0,
            print_frames: false,
        }
    }

    #[test]
    fn records_only_after_warmup_and_stops_at_window() {
        // run time after tick k is 0.25k; recorded when > 1.0, done at >= 3.0
        let mut harness = BenchHarness::new(config(1.0, 3.0));
        let mut system = PlanLog::default();
        let mut clock = ScriptedClock::fixed(0.25);

        let report = harness.run(&mut system, &mut clock, None, &mut NeverClose);

        assert_eq!(report.termination, Termination::Completed);
        assert_eq!(report.ticks, 12);
        assert_eq!(report.stats.samples, 8);
        assert_eq!(report.run_time_secs, 3.0);
        assert_eq!(report.stats.mean_fps, Some(4.0));
        assert_eq!(report.stats.fps_std_dev, Some(0.0));
        assert_eq!(harness.phase(), BenchPhase::Finished);
        assert!(harness.record().is_closed());
        assert!(system.shut_down);
    }

    #[test]
    fn plans_use_previous_tick_duration() {
        let mut harness = BenchHarness::new(config(0.0, 1.0));
        let mut system = PlanLog::default();
        let mut clock = ScriptedClock::from_durations(&[0.125, 0.25, 0.5, 0.25]);

        harness.run(&mut system, &mut clock, None, &mut NeverClose);

        let dts: Vec<f64> = system.plans.iter().map(|p| p.dt).collect();
        assert_eq!(dts, vec![0.0, 0.125, 0.25, 0.5]);
    }

    #[test]
    fn spawn_and_cleanup_timers_fire_on_cadence() {
        let mut harness = BenchHarness::new(config(0.0, 2.0));
        let mut system = PlanLog::default();
        let mut clock = ScriptedClock::fixed(0.25);

        harness.run(&mut system, &mut clock, None, &mut NeverClose);

        let spawns = system.plans.iter().filter(|p| p.spawn_secs.is_some()).count();
        let cleanups: Vec<usize> = system
            .plans
            .iter()
            .enumerate()
            .filter(|(_, p)| p.advance_floor)
            .map(|(i, _)| i)
            .collect();
        // 8 ticks; spawn timer reaches 0.5 before ticks 2, 4, 6
        assert_eq!(system.plans.len(), 8);
        assert_eq!(spawns, 3);
        assert!(system
            .plans
            .iter()
            .filter_map(|p| p.spawn_secs)
            .all(|s| s == 0.5));
        // cleanup timer reaches 1.0 before tick 4
        assert_eq!(cleanups, vec![4]);
    }

    #[test]
    fn zero_window_finishes_without_ticking() {
        let mut harness = BenchHarness::new(config(5.0, 0.0));
        assert_eq!(harness.phase(), BenchPhase::Finished);
        let mut system = PlanLog::default();
        let mut clock = ScriptedClock::fixed(0.25);

        let report = harness.run(&mut system, &mut clock, None, &mut NeverClose);

        assert_eq!(report.ticks, 0);
        assert!(!report.stats.has_data());
        assert!(report.stats.mean_fps.is_none());
        assert!(system.plans.is_empty());
        assert!(report.format_text().contains("No frames were recorded"));
    }

    #[test]
    fn close_signal_stops_within_one_tick() {
        let mut harness = BenchHarness::new(config(0.0, 100.0));
        let mut system = PlanLog::default();
        let mut clock = ScriptedClock::fixed(0.25);

        let report = harness.run(&mut system, &mut clock, None, &mut TickLimit::new(3));

        assert_eq!(report.termination, Termination::CloseRequested);
        assert_eq!(report.ticks, 3);
        assert_eq!(report.stats.samples, 3);
    }

    #[test]
    fn system_failure_keeps_recorded_samples() {
        let mut harness = BenchHarness::new(config(0.0, 100.0));
        let mut system = PlanLog {
            fail_on: Some(5),
            ..PlanLog::default()
        };
        let mut clock = ScriptedClock::fixed(0.25);

        let report = harness.run(&mut system, &mut clock, None, &mut NeverClose);

        assert!(matches!(report.termination, Termination::Failed { .. }));
        assert_eq!(report.ticks, 5);
        assert_eq!(report.stats.samples, 5);
        assert!(system.shut_down);
    }

    #[test]
    fn renderer_failure_is_fatal_and_tick_is_not_recorded() {
        let mut harness = BenchHarness::new(config(0.0, 100.0));
        let mut system = PlanLog::default();
        let mut clock = ScriptedClock::fixed(0.25);
        let mut renderer = CountingRenderer {
            calls: 0,
            fail_at: Some(4),
        };

        let report = harness.run(
            &mut system,
            &mut clock,
            Some(&mut renderer),
            &mut NeverClose,
        );

        match &report.termination {
            Termination::Failed { message } => assert!(message.contains("device lost")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(report.ticks, 4);
        assert_eq!(report.stats.samples, 3);
    }

    #[test]
    fn render_channel_reports_logic_time() {
        let mut harness = BenchHarness::new(config(0.0, 1.0));
        let mut system = PlanLog::default();
        let mut clock = ScriptedClock::from_timings(vec![TickTiming {
            frame: 0.25,
            render: Some(0.0625),
        }]);
        let mut renderer = CountingRenderer {
            calls: 0,
            fail_at: None,
        };

        let report = harness.run(
            &mut system,
            &mut clock,
            Some(&mut renderer),
            &mut NeverClose,
        );

        assert_eq!(renderer.calls, 4);
        assert_eq!(report.stats.mean_render_secs, Some(0.0625));
        assert_eq!(report.stats.mean_logic_secs, Some(0.1875));
    }

    #[test]
    fn frame_dump_follows_toggle() {
        let mut cfg = config(0.0, 0.5);
        cfg.print_frames = true;
        let mut harness = BenchHarness::new(cfg);
        let mut system = PlanLog::default();
        let mut clock = ScriptedClock::fixed(0.25);

        let report = harness.run(&mut system, &mut clock, None, &mut NeverClose);
        assert_eq!(report.frame_rates, Some(vec![4.0, 4.0]));
    }

    #[test]
    fn negative_duration_is_fatal() {
        let mut harness = BenchHarness::new(config(0.0, 1.0));
        let mut system = PlanLog::default();
        let mut clock = ScriptedClock::from_durations(&[0.25, -1.0]);

        let report = harness.run(&mut system, &mut clock, None, &mut NeverClose);
        assert!(matches!(report.termination, Termination::Failed { .. }));
        assert_eq!(report.stats.samples, 1);
    }
}
