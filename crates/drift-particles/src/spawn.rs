//! Spawn parameters and the pool spawner

use crate::particle::{Particle, ParticlePool};
use crate::rand::ParticleRng;
use drift_core::{BenchConfig, Result, Vec3};
use std::ops::Range;

/// Kinematic ranges for new particles, taken from a [`BenchConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub origin: Vec3,
    pub start_range: u32,
    pub max_init_velocity: u32,
    pub max_scale: u32,
    pub max_life_ms: u32,
}

impl From<&BenchConfig> for SpawnParams {
    fn from(config: &BenchConfig) -> Self {
        Self {
            origin: config.origin,
            start_range: config.start_range,
            max_init_velocity: config.max_init_velocity,
            max_scale: config.max_scale,
            max_life_ms: config.max_life_ms,
        }
    }
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self::from(&BenchConfig::default())
    }
}

impl SpawnParams {
    /// Build one particle. Seven draws, always in the same order:
    /// x, z, vx, vy, vz, radius, life.
    pub fn draw_particle(&self, rng: &mut ParticleRng) -> Particle {
        let half_range = self.start_range as f64 / 2.0;
        let x = self.origin.x + rng.below(self.start_range) as f64 - half_range;
        let z = self.origin.z + rng.below(self.start_range) as f64 - half_range;

        let velocity = Vec3::new(
            rng.below(self.max_init_velocity) as f64,
            rng.below(self.max_init_velocity) as f64,
            rng.below(self.max_init_velocity) as f64,
        );

        // at least 1/200
        let radius = (1 + rng.below(self.max_scale.saturating_mul(100))) as f64 / 200.0;
        let life = rng.below(self.max_life_ms) as f64 / 1000.0;

        Particle::new(Vec3::new(x, self.origin.y, z), velocity, radius, life)
    }
}

/// Particles released by `elapsed` seconds of spawning at `rate` per second
pub fn spawn_count(elapsed: f64, rate: f64) -> usize {
    let n = (elapsed * rate).floor();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}

/// Append `floor(elapsed * rate)` new particles at the pool's ceiling.
///
/// On overflow nothing is written and the generator is left untouched.
pub fn spawn(
    pool: &mut ParticlePool,
    rng: &mut ParticleRng,
    params: &SpawnParams,
    elapsed: f64,
    rate: f64,
) -> Result<Range<usize>> {
    let count = spawn_count(elapsed, rate);
    pool.spawn_batch(count, || params.draw_particle(rng))
}
