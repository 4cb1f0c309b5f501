//! Explicit Euler integration of the active range

use crate::particle::ParticlePool;
use crate::wind::Wind;

/// Advance every alive particle by `dt` seconds. Returns how many died.
///
/// Position moves by the old velocity, then wind (scaled by 1/radius) and
/// gravity act on the velocity. Dead slots are skipped.
pub fn integrate(pool: &mut ParticlePool, wind: &Wind, gravity: f64, dt: f64) -> usize {
    let w = wind.velocity;
    let mut deaths = 0;

    for p in pool.active_mut().iter_mut().filter(|p| p.alive) {
        debug_assert!(p.radius > 0.0, "particle radius must be positive");

        p.position += p.velocity * dt;

        p.velocity.x += w.x / p.radius;
        p.velocity.y += w.y / p.radius;
        p.velocity.y -= gravity * dt;
        p.velocity.z += w.z / p.radius;

        p.life -= dt;
        if p.life <= 0.0 {
            p.alive = false;
            deaths += 1;
        }
    }
    deaths
}
