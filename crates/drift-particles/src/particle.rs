//! Particle state and the lazy-deletion pool that owns it

use drift_core::{DriftError, RenderInstance, Result, StateHasher, Vec3};
use std::ops::Range;

/// One simulated point particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f64,
    /// Seconds left before the particle dies
    pub life: f64,
    pub alive: bool,
}

impl Particle {
    pub const fn dead() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            radius: 0.0,
            life: 0.0,
            alive: false,
        }
    }

    pub fn new(position: Vec3, velocity: Vec3, radius: f64, life: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            life,
            alive: true,
        }
    }

    pub fn render_instance(&self) -> RenderInstance {
        RenderInstance::new(self.position, self.radius)
    }

    fn hash_into(&self, h: &mut StateHasher) {
        for v in self.position.to_array() {
            h.write_f64(v);
        }
        for v in self.velocity.to_array() {
            h.write_f64(v);
        }
        h.write_f64(self.radius);
        h.write_f64(self.life);
        h.write_bool(self.alive);
    }
}

/// Fixed-capacity arena with lazy deletion.
///
/// Slots below `live_floor` are dead, slots at or above `live_ceiling` have
/// never been spawned, and `[live_floor, live_ceiling)` is the active range
/// that scans walk, skipping dead slots. Slots are never moved or freed; the
/// backing storage is allocated once.
pub struct ParticlePool {
    particles: Vec<Particle>,
    live_floor: usize,
    live_ceiling: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::dead(); capacity],
            live_floor: 0,
            live_ceiling: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn live_floor(&self) -> usize {
        self.live_floor
    }

    pub fn live_ceiling(&self) -> usize {
        self.live_ceiling
    }

    /// Unspawned slots left
    pub fn available(&self) -> usize {
        self.particles.len() - self.live_ceiling
    }

    pub fn active_range(&self) -> Range<usize> {
        self.live_floor..self.live_ceiling
    }

    /// Slots in the active range, alive or not
    pub fn active(&self) -> &[Particle] {
        &self.particles[self.live_floor..self.live_ceiling]
    }

    pub fn active_mut(&mut self) -> &mut [Particle] {
        &mut self.particles[self.live_floor..self.live_ceiling]
    }

    /// Alive particles in the active range
    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.active().iter().filter(|p| p.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Every slot ever spawned, `[0, live_ceiling)`
    pub fn spawned(&self) -> &[Particle] {
        &self.particles[..self.live_ceiling]
    }

    /// Append `count` particles at `live_ceiling`, each built by `init`.
    ///
    /// Fails without touching any slot when the batch does not fit.
    pub fn spawn_batch<F>(&mut self, count: usize, mut init: F) -> Result<Range<usize>>
    where
        F: FnMut() -> Particle,
    {
        let available = self.available();
        if count > available {
            return Err(DriftError::PoolOverflow {
                requested: count,
                available,
            });
        }
        let start = self.live_ceiling;
        for slot in &mut self.particles[start..start + count] {
            *slot = init();
        }
        self.live_ceiling += count;
        Ok(start..self.live_ceiling)
    }

    /// Append one particle
    pub fn push(&mut self, particle: Particle) -> Result<usize> {
        let range = self.spawn_batch(1, || particle)?;
        Ok(range.start)
    }

    /// Move `live_floor` up to the first alive slot, or to `live_ceiling`
    /// when nothing in the active range is alive. Only slots in the active
    /// range are read. Returns the new floor.
    pub fn advance_floor(&mut self) -> usize {
        let skipped = self
            .active()
            .iter()
            .position(|p| p.alive)
            .unwrap_or(self.live_ceiling - self.live_floor);
        self.live_floor += skipped;
        self.live_floor
    }

    /// Write `(position, radius)` of every alive particle into `out`
    pub fn pack_instances(&self, out: &mut Vec<RenderInstance>) {
        out.clear();
        out.extend(self.alive().map(Particle::render_instance));
    }

    /// Feed cursors and every spawned slot into a state hash
    pub fn hash_into(&self, h: &mut StateHasher) {
        h.write_u64(self.live_floor as u64);
        h.write_u64(self.live_ceiling as u64);
        for p in self.spawned() {
            p.hash_into(h);
        }
    }

    #[cfg(test)]
    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }
}
