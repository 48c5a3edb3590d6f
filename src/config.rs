use crate::filter::FilterOperation;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Inputs the filter compiler takes from outside: the firmware types the
/// fleet reports and the user's favorite devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterConfig {
    /// Known firmware types; the first is the default for firmware filters
    pub firmware_types: Vec<String>,
    pub favorite_devices: Vec<String>,
    /// Combine operator for queries that do not state one
    pub default_operation: FilterOperation,
}

impl FilterConfig {
    /// Replace the configured lists with any given on the command line
    pub fn with_overrides(
        mut self,
        firmware_types: Option<Vec<String>>,
        favorite_devices: Option<Vec<String>>,
    ) -> Self {
        if let Some(types) = firmware_types {
            self.firmware_types = types;
        }
        if let Some(devices) = favorite_devices {
            self.favorite_devices = devices;
        }
        self
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FilterConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<FilterConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    let config = toml::from_str::<FilterConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        firmware_types = config.firmware_types.len(),
        favorites = config.favorite_devices.len(),
        "Loaded filter config"
    );
    Ok(config)
}

pub fn default_config() -> &'static FilterConfig {
    static DEFAULT_CONFIG: LazyLock<FilterConfig> = LazyLock::new(FilterConfig::default);
    &DEFAULT_CONFIG
}
