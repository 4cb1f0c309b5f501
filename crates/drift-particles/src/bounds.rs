//! Boundary bounce against the axis-aligned volume

use crate::particle::ParticlePool;
use drift_core::{Bounds, Vec3};

/// Velocity factor applied on every bounce
pub const RESTITUTION: f64 = -1.1;

/// Clamp escaped particles back inside `bounds` and reverse the offending
/// velocity component. Faces are checked min-X, max-X, min-Y, max-Y, min-Z,
/// max-Z. Returns the number of bounces.
pub fn resolve(pool: &mut ParticlePool, bounds: &Bounds) -> usize {
    let (lo, hi) = (bounds.min.to_array(), bounds.max.to_array());
    let mut bounces = 0;

    for p in pool.active_mut().iter_mut().filter(|p| p.alive) {
        let mut pos = p.position.to_array();
        let mut vel = p.velocity.to_array();
        let r = p.radius;

        for axis in 0..3 {
            if pos[axis] < lo[axis] {
                pos[axis] = lo[axis] + r;
                vel[axis] *= RESTITUTION;
                bounces += 1;
            }
            if pos[axis] > hi[axis] {
                pos[axis] = hi[axis] - r;
                vel[axis] *= RESTITUTION;
                bounces += 1;
            }
        }

        p.position = Vec3::from_array(pos);
        p.velocity = Vec3::from_array(vel);
    }
    bounces
}
