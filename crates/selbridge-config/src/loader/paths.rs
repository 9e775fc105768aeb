//! Where the config file lives, and writing the default one.

use std::path::{Path, PathBuf};

use selbridge_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "selbridge";
const FILE_NAME: &str = "config.toml";

/// Config file location under a platform config directory.
pub(crate) fn config_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join(APP_DIR).join(FILE_NAME)
}

/// `<config_dir>/selbridge/config.toml` for the current platform.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| config_path_in(&dir))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Write the commented default config to `path`, creating parent
/// directories as needed.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_failure = |what: &str, at: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("cannot {what} {}: {e}", at.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_failure("create", parent, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_failure("write", path, e))?;

    info!(path = %path.display(), "wrote default config");
    Ok(())
}
