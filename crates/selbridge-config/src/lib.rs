//! Selection bridge configuration.
//!
//! TOML-based configuration with serde defaults, so a partial file (or no
//! file at all) yields a working setup.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use selbridge_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config.bridge.entry_point);
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{create_default_config, default_config_path, load_default, load_from_path};
pub use schema::{BridgeConfig, LoggingConfig, SelbridgeConfig, WindowConfig};

use std::path::Path;

use selbridge_common::ConfigError;

/// Load config from `path` when given, otherwise from the platform default
/// location, then validate it.
pub fn load_config_from(path: Option<&Path>) -> Result<SelbridgeConfig, ConfigError> {
    let config = match path {
        Some(p) => load_from_path(p)?,
        None => load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from the platform default path.
pub fn load_config() -> Result<SelbridgeConfig, ConfigError> {
    load_config_from(None)
}
