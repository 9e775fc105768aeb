/// Default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Selection Bridge configuration
# Only override what you want to change -- missing fields use defaults.

[bridge]
# Remote object the document resolves through the channel.
# object_name = "backend"
# Method on that object receiving click reports.
# click_method = "onElementClicked"
# Global the host calls to move the selection.
# entry_point = "highlightElement"
# Attribute identifying elements (must be data-*).
# id_attribute = "data-element-id"
# Class applied to the selected element.
# marker_class = "selected-element"

[window]
# title = "Selection Bridge"
# width = 1024           # 200-8192
# height = 768           # 200-8192
# devtools = false

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}
