//! Tests for TOML config loading, creation, and path resolution.

use super::load::load_or_create;
use super::template::default_config_toml;
use super::*;
use crate::schema::SelbridgeConfig;
use selbridge_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let err = load_from_path(Path::new("/tmp/nonexistent_selbridge_config.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[bridge]
id_attribute = "data-node"

[window]
width = 1280
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.bridge.id_attribute, "data-node");
    assert_eq!(config.window.width, 1280);
    // Defaults preserved
    assert_eq!(config.bridge.entry_point, "highlightElement");
    assert_eq!(config.window.height, 768);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn load_keeps_values_that_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[window]\nwidth = 50\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.width, 50);
}

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = load_or_create(&path).unwrap();
    assert_eq!(config, SelbridgeConfig::default());
    assert!(path.exists());

    // Second load reads the file that was just written.
    let reloaded = load_from_path(&path).unwrap();
    assert_eq!(reloaded, SelbridgeConfig::default());
}

#[test]
fn template_parses_to_defaults() {
    let config: SelbridgeConfig = toml::from_str(&default_config_toml()).unwrap();
    assert_eq!(config, SelbridgeConfig::default());
}

#[test]
fn default_path_ends_with_selbridge_config() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("selbridge/config.toml"));
    }
}

#[test]
fn config_path_is_scoped_to_app_dir() {
    let path = super::paths::config_path_in(Path::new("/home/u/.config"));
    assert_eq!(path, Path::new("/home/u/.config/selbridge/config.toml"));
}

#[test]
fn create_default_config_builds_missing_parents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("config.toml");

    create_default_config(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), default_config_toml());
}
