//! Subcommand implementations.

pub mod banks;
pub mod batch;
pub mod config;
pub mod decode;
pub mod dv;
pub mod generate;
pub mod parse;

use std::path::Path;

use boleto_core::BoletoConfig;
use tracing::debug;

/// Load the configuration named on the command line, else the default file
/// when it exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BoletoConfig> {
    if let Some(path) = config_path {
        return Ok(BoletoConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(BoletoConfig::from_file(&default_path)?)
    } else {
        Ok(BoletoConfig::default())
    }
}
