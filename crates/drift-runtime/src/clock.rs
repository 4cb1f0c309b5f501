//! Tick clocks: wall-clock measurement and scripted durations for tests

use std::time::Instant;

/// Measured cost of one tick, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickTiming {
    pub frame: f64,
    /// Portion spent in the renderer; `None` when nothing was rendered
    pub render: Option<f64>,
}

/// Source of per-tick durations.
///
/// The harness brackets each tick with `begin_tick`/`end_tick` and the render
/// call with `begin_render`/`end_render`.
pub trait TickClock {
    fn begin_tick(&mut self);
    fn begin_render(&mut self);
    fn end_render(&mut self);
    fn end_tick(&mut self) -> TickTiming;
}

/// Measures real elapsed time with `Instant`
pub struct WallClock {
    tick_start: Instant,
    render_start: Option<Instant>,
    render: Option<f64>,
}

impl Default for WallClock {
    fn default() -> Self {
        Self {
            tick_start: Instant::now(),
            render_start: None,
            render: None,
        }
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickClock for WallClock {
    fn begin_tick(&mut self) {
        self.tick_start = Instant::now();
        self.render_start = None;
        self.render = None;
    }

    fn begin_render(&mut self) {
        self.render_start = Some(Instant::now());
    }

    fn end_render(&mut self) {
        if let Some(start) = self.render_start.take() {
            self.render = Some(start.elapsed().as_secs_f64());
        }
    }

    fn end_tick(&mut self) -> TickTiming {
        TickTiming {
            frame: self.tick_start.elapsed().as_secs_f64(),
            render: self.render.take(),
        }
    }
}

/// Replays a fixed script of tick timings, repeating the last entry once the
/// script runs out. Render time is only reported for ticks that rendered.
pub struct ScriptedClock {
    script: Vec<TickTiming>,
    cursor: usize,
    rendered: bool,
}

impl ScriptedClock {
    /// Every tick takes exactly `frame` seconds
    pub fn fixed(frame: f64) -> Self {
        Self::from_timings(vec![TickTiming {
            frame,
            render: None,
        }])
    }

    /// Ticks take the given durations in order
    pub fn from_durations(frames: &[f64]) -> Self {
        Self::from_timings(
            frames
                .iter()
                .map(|&frame| TickTiming {
                    frame,
                    render: None,
                })
                .collect(),
        )
    }

    pub fn from_timings(script: Vec<TickTiming>) -> Self {
        Self {
            script,
            cursor: 0,
            rendered: false,
        }
    }

    fn current(&self) -> TickTiming {
        let idx = self.cursor.min(self.script.len().saturating_sub(1));
        self.script.get(idx).copied().unwrap_or(TickTiming {
            frame: 0.0,
            render: None,
        })
    }
}

impl TickClock for ScriptedClock {
    fn begin_tick(&mut self) {
        self.rendered = false;
    }

    fn begin_render(&mut self) {}

    fn end_render(&mut self) {
        self.rendered = true;
    }

    fn end_tick(&mut self) -> TickTiming {
        let mut timing = self.current();
        if self.rendered {
            timing.render = Some(timing.render.unwrap_or(0.0));
        } else {
            timing.render = None;
        }
        self.cursor += 1;
        timing
    }
}
