//! Protocol names shared by the document side and the host side.

use serde::{Deserialize, Serialize};

pub const DEFAULT_OBJECT_NAME: &str = "backend";
pub const DEFAULT_CLICK_METHOD: &str = "onElementClicked";
pub const DEFAULT_ENTRY_POINT: &str = "highlightElement";
pub const DEFAULT_ID_ATTRIBUTE: &str = "data-element-id";
pub const DEFAULT_MARKER_CLASS: &str = "selected-element";

/// Names that both halves of the bridge must agree on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeOptions {
    /// Name of the remote object resolved through the channel.
    pub object_name: String,
    /// Method on the remote object that receives click reports.
    pub click_method: String,
    /// Globally exposed callable the host uses to steer the selection.
    pub entry_point: String,
    /// Attribute holding an element's identifier.
    pub id_attribute: String,
    /// Class toggled on the selected element.
    pub marker_class: String,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            object_name: DEFAULT_OBJECT_NAME.to_string(),
            click_method: DEFAULT_CLICK_METHOD.to_string(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            id_attribute: DEFAULT_ID_ATTRIBUTE.to_string(),
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
        }
    }
}
