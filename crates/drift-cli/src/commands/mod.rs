pub mod config;
pub mod graph;
pub mod run;
pub mod trace;

use anyhow::{Context, Result};
use drift_core::BenchConfig;

/// Load `path`, or the defaults when no file is given
pub fn load_config(path: Option<&str>) -> Result<BenchConfig> {
    match path {
        Some(p) => {
            BenchConfig::load(p).with_context(|| format!("Failed to load config '{}'", p))
        }
        None => Ok(BenchConfig::default()),
    }
}
