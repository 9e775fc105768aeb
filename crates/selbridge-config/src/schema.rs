//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use serde::{Deserialize, Serialize};

use selbridge_common::options::{
    DEFAULT_CLICK_METHOD, DEFAULT_ENTRY_POINT, DEFAULT_ID_ATTRIBUTE, DEFAULT_MARKER_CLASS,
    DEFAULT_OBJECT_NAME,
};
use selbridge_common::BridgeOptions;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelbridgeConfig {
    pub bridge: BridgeConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Bridge Config
// =============================================================================

/// Protocol names shared by the document script and the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub object_name: String,
    pub click_method: String,
    pub entry_point: String,
    pub id_attribute: String,
    pub marker_class: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            object_name: DEFAULT_OBJECT_NAME.into(),
            click_method: DEFAULT_CLICK_METHOD.into(),
            entry_point: DEFAULT_ENTRY_POINT.into(),
            id_attribute: DEFAULT_ID_ATTRIBUTE.into(),
            marker_class: DEFAULT_MARKER_CLASS.into(),
        }
    }
}

impl BridgeConfig {
    pub fn to_options(&self) -> BridgeOptions {
        BridgeOptions {
            object_name: self.object_name.clone(),
            click_method: self.click_method.clone(),
            entry_point: self.entry_point.clone(),
            id_attribute: self.id_attribute.clone(),
            marker_class: self.marker_class.clone(),
        }
    }
}

// =============================================================================
// Window Config
// =============================================================================

/// Host window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width in pixels (200-8192).
    pub width: u32,
    /// Logical height in pixels (200-8192).
    pub height: u32,
    /// Enable webview dev tools (always on in debug builds).
    pub devtools: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Selection Bridge".into(),
            width: 1024,
            height: 768,
            devtools: false,
        }
    }
}

// =============================================================================
// Logging Config
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl LoggingConfig {
    /// `EnvFilter` directive scoping the level to this workspace's crates.
    pub fn directive(&self) -> String {
        format!("selbridge={}", self.level)
    }
}
