//! Benchmark configuration, loaded from TOML
//!
//! Every constant of a run lives here and is fixed once the run starts.
//! Defaults reproduce the classic particle benchmark: 2000 particles/s for
//! 25 s (five maximum lifetimes), a 5 s warm-up, and a 160×140×200 box.

use crate::error::{DriftError, Result};
use crate::types::{Bounds, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Initial generator state
    pub seed: u32,
    /// Particles spawned per simulated second
    pub spawn_rate: f64,
    /// Seconds of spawning released per spawn batch
    pub spawn_interval: f64,
    /// Exclusive upper bound of each initial velocity component
    pub max_init_velocity: u32,
    /// Exclusive upper bound of particle life, in milliseconds
    pub max_life_ms: u32,
    /// Radius scale; radii fall in (0, max_scale / 2]
    pub max_scale: u32,
    /// Wind random-walk granularity
    pub wind_change: u32,
    /// Per-axis wind magnitude bound
    pub max_wind: f64,
    pub gravity: f64,
    pub bounds: Bounds,
    /// Centre of the spawn box
    pub origin: Vec3,
    /// Edge length of the spawn box on X and Z
    pub start_range: u32,
    /// Run length in seconds of measured tick time
    pub observation_window: f64,
    /// Leading seconds excluded from statistics
    pub warmup: f64,
    /// Seconds between `live_floor` advances
    pub cleanup_interval: f64,
    /// Append the raw per-tick frame rates to the report
    pub print_frames: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        let max_life_ms = 5000;
        let bounds = Bounds::default();
        Self {
            seed: 1_234_569,
            spawn_rate: 2000.0,
            spawn_interval: 0.01,
            max_init_velocity: 7,
            max_life_ms,
            max_scale: 4,
            wind_change: 2000,
            max_wind: 3.0,
            gravity: 50.0,
            bounds,
            origin: Vec3::new(
                0.0,
                bounds.max.y,
                bounds.min.z + (bounds.min.z + bounds.max.z) / 2.0,
            ),
            start_range: 15,
            observation_window: (max_life_ms / 1000) as f64 * 5.0,
            warmup: max_life_ms as f64 / 1000.0,
            cleanup_interval: max_life_ms as f64 / 1000.0,
            print_frames: false,
        }
    }
}

impl BenchConfig {
    /// Parse a config from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: BenchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of pool slots a full run can ever need.
    pub fn pool_capacity(&self) -> usize {
        let slots = (self.observation_window * self.spawn_rate).ceil();
        if slots.is_finite() && slots > 0.0 {
            slots as usize
        } else {
            0
        }
    }

    pub fn validate(&self) -> Result<()> {
        positive_modulus("max_init_velocity", self.max_init_velocity)?;
        positive_modulus("max_life_ms", self.max_life_ms)?;
        positive_modulus("max_scale", self.max_scale)?;
        positive_modulus("wind_change", self.wind_change)?;
        positive_modulus("start_range", self.start_range)?;

        positive("spawn_rate", self.spawn_rate)?;
        positive("spawn_interval", self.spawn_interval)?;
        positive("max_wind", self.max_wind)?;
        positive("cleanup_interval", self.cleanup_interval)?;
        non_negative("observation_window", self.observation_window)?;
        non_negative("warmup", self.warmup)?;

        if !self.gravity.is_finite() {
            return Err(DriftError::invalid("gravity", "must be finite"));
        }
        if !self.origin.is_finite() {
            return Err(DriftError::invalid("origin", "must be finite"));
        }
        if !self.bounds.min.is_finite() || !self.bounds.max.is_finite() {
            return Err(DriftError::invalid("bounds", "must be finite"));
        }
        let (lo, hi) = (self.bounds.min, self.bounds.max);
        if lo.x >= hi.x || lo.y >= hi.y || lo.z >= hi.z {
            return Err(DriftError::invalid(
                "bounds",
                format!("min {:?} must be below max {:?} on every axis", lo, hi),
            ));
        }
        Ok(())
    }
}

fn positive_modulus(field: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(DriftError::invalid(field, "must be at least 1"));
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DriftError::invalid(
            field,
            format!("must be a positive number, got {value}"),
        ));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DriftError::invalid(
            field,
            format!("must be zero or positive, got {value}"),
        ));
    }
    Ok(())
}
