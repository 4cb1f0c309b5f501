//! Spatial and render-facing types

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// A 3D vector in simulation space (double precision)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Largest absolute component
    pub fn max_abs(&self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Axis-aligned simulation volume
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec3::new(-80.0, -90.0, 50.0),
            max: Vec3::new(80.0, 50.0, 250.0),
        }
    }
}

impl Bounds {
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

/// Per-particle data handed to the renderer collaborator.
/// 16 bytes: xyz = position, w = radius.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    pub pos_radius: [f32; 4],
}

impl RenderInstance {
    pub fn new(position: Vec3, radius: f64) -> Self {
        Self {
            pos_radius: [
                position.x as f32,
                position.y as f32,
                position.z as f32,
                radius as f32,
            ],
        }
    }

    pub fn position(&self) -> [f32; 3] {
        [self.pos_radius[0], self.pos_radius[1], self.pos_radius[2]]
    }

    pub fn radius(&self) -> f32 {
        self.pos_radius[3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, -1.0, 2.0);
        assert_eq!(a + b, Vec3::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, Vec3::new(0.5, 3.0, 1.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));

        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
    }

    #[test]
    fn vec3_max_abs() {
        assert_eq!(Vec3::new(-4.0, 1.0, 3.5).max_abs(), 4.0);
        assert_eq!(Vec3::ZERO.max_abs(), 0.0);
    }

    #[test]
    fn default_bounds_contain_origin_column() {
        let bounds = Bounds::default();
        assert!(bounds.contains(Vec3::new(0.0, 0.0, 200.0)));
        assert!(!bounds.contains(Vec3::new(-81.0, 0.0, 200.0)));
        assert!(!bounds.contains(Vec3::new(0.0, 0.0, 251.0)));
    }

    #[test]
    fn render_instance_layout() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 16);
        let inst = RenderInstance::new(Vec3::new(1.0, 2.0, 3.0), 0.5);
        assert_eq!(inst.position(), [1.0, 2.0, 3.0]);
        assert_eq!(inst.radius(), 0.5);
    }
}
