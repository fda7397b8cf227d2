pub mod batch;
pub mod bench;
pub mod config;
pub mod extract;

use std::path::Path;

use pdftext_core::PdftextConfig;

/// Load the config file named on the command line, or the default location
/// when it exists, or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PdftextConfig> {
    if let Some(path) = config_path {
        return Ok(PdftextConfig::from_file(Path::new(path))?);
    }
    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(PdftextConfig::from_file(&default_path)?)
    } else {
        Ok(PdftextConfig::default())
    }
}
