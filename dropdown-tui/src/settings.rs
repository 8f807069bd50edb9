//! Widget configuration loading.

use std::path::Path;

use dropdown::config::DropdownConfig;

use crate::error::TuiError;
use crate::paths;

/// Load the widget config from the platform config dir.
///
/// A missing file means defaults; a present but unreadable or invalid file
/// is an error.
pub fn load() -> Result<DropdownConfig, TuiError> {
    match paths::config_file() {
        Some(path) => load_from(&path),
        None => {
            log::warn!("no home directory, using default dropdown config");
            Ok(DropdownConfig::default())
        }
    }
}

pub fn load_from(path: &Path) -> Result<DropdownConfig, TuiError> {
    if !path.exists() {
        log::debug!("{} not found, using default dropdown config", path.display());
        return Ok(DropdownConfig::default());
    }
    let config = DropdownConfig::from_path(path)?;
    log::info!("loaded dropdown config from {}", path.display());
    Ok(config)
}
