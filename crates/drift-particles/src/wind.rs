//! Bounded random-walk wind

use crate::rand::ParticleRng;
use drift_core::Vec3;

/// Global wind vector shared by every particle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Wind {
    pub velocity: Vec3,
}

impl Wind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Random-walk each axis by a step scaled by `dt`, drawing x, y, z in
    /// that order. An axis that ends up beyond `max` is flipped and halved,
    /// repeatedly, until it is back inside.
    pub fn update(&mut self, rng: &mut ParticleRng, change: u32, max: f64, dt: f64) {
        let change = change.max(1);
        let scale = change as f64;
        let bias = scale / 2000.0;

        let mut axes = self.velocity.to_array();
        for w in &mut axes {
            let step = rng.below(change) as f64 / scale - bias;
            *w += step * dt;
            while w.is_finite() && w.abs() > max {
                *w *= -0.5;
            }
        }
        self.velocity = Vec3::from_array(axes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_matches_draws() {
        let mut wind = Wind::new();
        let mut rng = ParticleRng::new(11);
        let mut check = rng.clone();
        wind.update(&mut rng, 2000, 3.0, 0.5);

        let expected: Vec<f64> = (0..3)
            .map(|_| ((check.next_draw() % 2000) as f64 / 2000.0 - 1.0) * 0.5)
            .collect();
        assert_eq!(wind.velocity.to_array().to_vec(), expected);
    }

    #[test]
    fn overshoot_bounces_back() {
        let mut wind = Wind {
            velocity: Vec3::new(-2.9, 0.0, 0.0),
        };
        let mut rng = ParticleRng::new(5);
        // long tick pushes x past -3
        wind.update(&mut rng, 2000, 3.0, 1000.0);
        assert!(wind.velocity.max_abs() <= 3.0);
    }

    #[test]
    fn zero_dt_leaves_wind_unchanged() {
        let start = Vec3::new(1.0, -2.0, 0.5);
        let mut wind = Wind { velocity: start };
        let mut rng = ParticleRng::new(5);
        wind.update(&mut rng, 2000, 3.0, 0.0);
        assert_eq!(wind.velocity, start);
    }

    #[test]
    fn bound_holds_over_many_updates() {
        let mut wind = Wind::new();
        let mut rng = ParticleRng::new(1_234_569);
        for i in 0..10_000 {
            let dt = if i % 100 == 0 { 50.0 } else { 0.02 };
            wind.update(&mut rng, 2000, 3.0, dt);
            assert!(wind.velocity.max_abs() <= 3.0);
        }
    }
}
