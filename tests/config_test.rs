//! Integration tests for Settings config loading.
//!
//! These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use nestline::application::ApplicationError;
use nestline::config::{local_config_path, Settings};
use nestline::domain::OrderMode;

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let project = TempDir::new().unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert_eq!(settings.cases_dir, PathBuf::from("cases"));
    assert_eq!(settings.marker, '-');
    assert_eq!(settings.order, OrderMode::Document);
    assert!(!settings.tree);
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        r#"
cases_dir = "fixtures"
marker = "="
order = "alphabetical"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert_eq!(settings.cases_dir, PathBuf::from("fixtures"));
    assert_eq!(settings.marker, '=');
    assert_eq!(settings.order, OrderMode::Alphabetical);
    assert!(!settings.tree, "unspecified field keeps default");
}

#[test]
fn given_template_written_when_load_then_equals_defaults() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), Settings::template()).unwrap();

    let settings = Settings::load(Some(project.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_broken_local_config_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "order = [").unwrap();

    let err = Settings::load(Some(project.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(".nestline.toml"));
}

#[test]
fn given_unknown_order_in_local_config_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "order = \"random\"").unwrap();

    let result = Settings::load(Some(project.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}
