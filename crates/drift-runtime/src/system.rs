//! Runtime system trait

use drift_core::{RenderInstance, Result};

/// Work the harness schedules for one tick.
///
/// `dt` is the measured duration of the previous tick, not a target step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPlan {
    /// Seconds to integrate by
    pub dt: f64,
    /// Seconds of spawning to release this tick, if the spawn timer fired
    pub spawn_secs: Option<f64>,
    /// Whether the cleanup timer fired
    pub advance_floor: bool,
}

impl TickPlan {
    /// A plan that only integrates
    pub fn integrate_only(dt: f64) -> Self {
        Self {
            dt,
            spawn_secs: None,
            advance_floor: false,
        }
    }
}

/// A system that can be ticked by the benchmark loop
///
/// The harness calls `update` once per tick, then hands `render_instances`
/// to the renderer collaborator before the next `update`.
pub trait RuntimeSystem {
    /// Called once before the first tick
    fn initialize(&mut self) -> Result<()>;

    /// Advance the simulation by one tick
    fn update(&mut self, plan: &TickPlan) -> Result<()>;

    /// Read-only snapshot of everything alive after the last update
    fn render_instances(&self) -> &[RenderInstance];

    /// Called once after the loop exits, even on failure
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
