//! Subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod suggest;

use std::path::Path;

use supplink_core::SupplinkConfig;

/// Load configuration from `--config`, else the default location if it
/// exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SupplinkConfig> {
    if let Some(path) = config_path {
        return Ok(SupplinkConfig::load(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(SupplinkConfig::load(&default_path)?)
    } else {
        Ok(SupplinkConfig::default())
    }
}
