//! Drift Core - Foundational types for the Drift particle benchmark
//!
//! This crate provides the types every other Drift crate depends on:
//! - `BenchConfig` - run constants, loaded from TOML
//! - `Vec3`, `Bounds` - simulation-space geometry
//! - `RenderInstance` - what the renderer collaborator gets to see
//! - `StateHash` - SHA-256 fingerprints for determinism checks
//! - Error types and Result alias

mod config;
mod error;
mod hash;
mod types;

pub use config::BenchConfig;
pub use error::{DriftError, Result};
pub use hash::{StateHash, StateHasher};
pub use types::{Bounds, RenderInstance, Vec3};
