//! Core TOML config loading: read from path or platform default.

use std::path::Path;

use selbridge_common::ConfigError;
use tracing::{info, warn};

use crate::schema::SelbridgeConfig;
use crate::validation;

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. Validation failures are logged
/// and the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<SelbridgeConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    let config: SelbridgeConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path, creating a default
/// file when none exists.
pub fn load_default() -> Result<SelbridgeConfig, ConfigError> {
    let path = default_config_path()?;
    load_or_create(&path)
}

pub(super) fn load_or_create(path: &Path) -> Result<SelbridgeConfig, ConfigError> {
    match load_from_path(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(path)?;
            Ok(SelbridgeConfig::default())
        }
        Err(e) => Err(e),
    }
}
