//! Print the effective configuration

use super::load_config;
use anyhow::Result;

pub fn run(path: Option<&str>) -> Result<()> {
    let config = load_config(path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
