//! Integration tests for layered Settings loading.
//!
//! These tests run without a global config (temp directories only), so they
//! exercise the local `.dsb.toml` layer on top of compiled defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use dsb_client::application::ApplicationError;
use dsb_client::config::{local_config_path, Settings};

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.default_purpose, "discipline");
    assert_eq!(settings.per.index_locator, "objectifs");
    assert_eq!(settings.fallback_languages[0], "de");
}

#[test]
fn given_local_config_with_languages_when_load_then_list_is_replaced() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
fallback_languages = ["fr", "it"]
default_purpose = "educational level"

[per]
index_locator = "api/v1/objectifs"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert: lists replace, they do not union with the defaults
    assert_eq!(settings.fallback_languages, vec!["fr", "it"]);
    assert_eq!(settings.default_purpose, "educational level");
    assert_eq!(settings.per.index_locator, "api/v1/objectifs");
}

#[test]
fn given_partial_local_config_when_load_then_unset_fields_keep_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "definitions_dir = \"/srv/curricula\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.definitions_dir, PathBuf::from("/srv/curricula"));
    assert_eq!(settings.default_purpose, "discipline");
    assert_eq!(settings.per.index_locator, "objectifs");
}

#[test]
fn given_tilde_in_definitions_dir_when_load_then_expanded() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "definitions_dir = \"~/curricula\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert!(!settings.definitions_dir.to_string_lossy().starts_with('~'));
    assert!(settings.definitions_dir.ends_with("curricula"));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "fallback_languages = [\"de\"").unwrap();

    let result = Settings::load(Some(dir.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_loaded_settings_when_rendering_toml_then_round_trips() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    let rendered = settings.to_toml().expect("render settings");

    assert!(rendered.contains("fallback_languages"));
    assert!(rendered.contains("[per]"));
}
