//! Drift Particles - the benchmarked particle simulation
//!
//! Provides a single-context particle simulation with:
//! - Fixed-capacity pool with lazy deletion (`live_floor` / `live_ceiling`)
//! - Seeded xorshift generator driving spawns and wind
//! - Bounded random-walk wind, gravity and explicit Euler integration
//! - Bounce-back against an axis-aligned volume
//! - Render-instance packing for the renderer collaborator

pub mod bounds;
pub mod particle;
pub mod physics;
pub mod rand;
pub mod spawn;
pub mod wind;

use drift_core::{BenchConfig, Bounds, RenderInstance, Result, StateHash, StateHasher};
use drift_runtime::{RuntimeSystem, TickPlan};
use tracing::{debug, info, trace};

pub use particle::{Particle, ParticlePool};
pub use rand::ParticleRng;
pub use spawn::SpawnParams;
pub use wind::Wind;

/// Running totals over the life of a simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimCounters {
    pub spawned: u64,
    pub deaths: u64,
    pub bounces: u64,
    pub floor_advances: u64,
}

/// The whole simulation state: generator, pool, wind and the packed snapshot.
pub struct Simulation {
    spawn: SpawnParams,
    spawn_rate: f64,
    wind_change: u32,
    max_wind: f64,
    gravity: f64,
    bounds: Bounds,
    rng: ParticleRng,
    pool: ParticlePool,
    wind: Wind,
    instances: Vec<RenderInstance>,
    counters: SimCounters,
}

impl Simulation {
    /// Build a simulation sized for `config.observation_window` of spawning.
    pub fn new(config: &BenchConfig) -> Result<Self> {
        config.validate()?;
        let capacity = config.pool_capacity();
        Ok(Self {
            spawn: SpawnParams::from(config),
            spawn_rate: config.spawn_rate,
            wind_change: config.wind_change,
            max_wind: config.max_wind,
            gravity: config.gravity,
            bounds: config.bounds,
            rng: ParticleRng::new(config.seed),
            pool: ParticlePool::new(capacity),
            wind: Wind::new(),
            instances: Vec::with_capacity(capacity),
            counters: SimCounters::default(),
        })
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn wind(&self) -> &Wind {
        &self.wind
    }

    pub fn rng(&self) -> &ParticleRng {
        &self.rng
    }

    pub fn counters(&self) -> SimCounters {
        self.counters
    }

    /// Hash of every spawned slot, both cursors, the wind and the generator
    pub fn state_hash(&self) -> StateHash {
        let mut h = StateHasher::new();
        self.pool.hash_into(&mut h);
        for w in self.wind.velocity.to_array() {
            h.write_f64(w);
        }
        h.write_u64(self.rng.state() as u64);
        h.finish()
    }

    /// One tick of simulation work, in fixed order: wind, spawn, cleanup,
    /// integrate, bounce, then pack the render snapshot.
    pub fn step(&mut self, plan: &TickPlan) -> Result<()> {
        self.wind
            .update(&mut self.rng, self.wind_change, self.max_wind, plan.dt);

        if let Some(secs) = plan.spawn_secs {
            let range = spawn::spawn(
                &mut self.pool,
                &mut self.rng,
                &self.spawn,
                secs,
                self.spawn_rate,
            )?;
            self.counters.spawned += range.len() as u64;
        }

        if plan.advance_floor {
            let before = self.pool.live_floor();
            let floor = self.pool.advance_floor();
            self.counters.floor_advances += 1;
            debug!(
                from = before,
                to = floor,
                ceiling = self.pool.live_ceiling(),
                "live floor advanced"
            );
        }

        let deaths = physics::integrate(&mut self.pool, &self.wind, self.gravity, plan.dt);
        let bounces = bounds::resolve(&mut self.pool, &self.bounds);
        self.counters.deaths += deaths as u64;
        self.counters.bounces += bounces as u64;

        self.pool.pack_instances(&mut self.instances);
        trace!(
            dt = plan.dt,
            alive = self.instances.len(),
            deaths,
            bounces,
            "tick"
        );
        Ok(())
    }
}

impl RuntimeSystem for Simulation {
    fn initialize(&mut self) -> Result<()> {
        info!(
            capacity = self.pool.capacity(),
            seed = self.rng.state(),
            "particle pool allocated"
        );
        Ok(())
    }

    fn update(&mut self, plan: &TickPlan) -> Result<()> {
        self.step(plan)
    }

    fn render_instances(&self) -> &[RenderInstance] {
        &self.instances
    }

    fn shutdown(&mut self) -> Result<()> {
        let c = self.counters;
        info!(
            spawned = c.spawned,
            deaths = c.deaths,
            bounces = c.bounces,
            live_floor = self.pool.live_floor(),
            live_ceiling = self.pool.live_ceiling(),
            "simulation finished"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
