//! Configuration file discovery and loading.

use crate::config::schema::NavConfig;
use crate::error::{NavError, Result};
use crate::vehicle::Vehicle;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "navigator.yml";

/// Find the config file to use.
///
/// An explicit path always wins; otherwise `navigator.yml` in `dir` is used
/// if it exists.
pub fn find_config(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load the configuration, falling back to defaults when there is no file.
///
/// Relative paths inside the file stay relative to the working directory.
///
/// # Errors
///
/// Returns `Io` if an explicit config file cannot be read and
/// `ConfigParseError` if the YAML is invalid.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<NavConfig> {
    match find_config(explicit, dir) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
            Ok(NavConfig::default())
        }
    }
}

/// Load a single config file.
pub fn load_config_file(path: &Path) -> Result<NavConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse and validate YAML content into NavConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<NavConfig> {
    let config: NavConfig =
        serde_yaml::from_str(content).map_err(|e| NavError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    if let Some(vehicle) = config.fleet.iter().find(|v| has_zero_param(v)) {
        return Err(NavError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: format!("{}: parameters must be positive integers", vehicle),
        });
    }

    Ok(config)
}

fn has_zero_param(vehicle: &Vehicle) -> bool {
    vehicle.params().contains(&0)
}
