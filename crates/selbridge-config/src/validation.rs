//! Configuration validation.
//!
//! Bridge names end up inside the generated document script and CSS
//! selectors, so they are restricted to plain identifiers.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::SelbridgeConfig;
use selbridge_common::ConfigError;

/// JavaScript identifier (ASCII subset).
static JS_IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Lowercase `data-*` attribute name.
static DATA_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data-[a-z0-9]+(-[a-z0-9]+)*$").unwrap());

/// CSS class identifier.
static CSS_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").unwrap());

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SelbridgeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    let bridge = &config.bridge;
    validate_pattern(&mut errors, "bridge.object_name", &bridge.object_name, &JS_IDENT_RE);
    validate_pattern(&mut errors, "bridge.click_method", &bridge.click_method, &JS_IDENT_RE);
    validate_pattern(&mut errors, "bridge.entry_point", &bridge.entry_point, &JS_IDENT_RE);
    validate_pattern(&mut errors, "bridge.id_attribute", &bridge.id_attribute, &DATA_ATTR_RE);
    validate_pattern(&mut errors, "bridge.marker_class", &bridge.marker_class, &CSS_CLASS_RE);

    validate_range(&mut errors, "window.width", config.window.width, 200, 8192);
    validate_range(&mut errors, "window.height", config.window.height, 200, 8192);

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(format!(
            "logging.level = {:?} must be one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_pattern(errors: &mut Vec<String>, name: &str, value: &str, re: &Regex) {
    if !re.is_match(value) {
        errors.push(format!("{name} = {value:?} is not a valid name"));
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
