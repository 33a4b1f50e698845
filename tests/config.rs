//! Configuration Loading Tests
//!
//! File and environment layering for PublisherConfig.

use implementors_registry::{ConfigurationError, LogFormat, PublisherConfig, SlotAccess};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

fn no_env() -> Option<HashMap<String, String>> {
    Some(HashMap::new())
}

#[test]
fn file_values_override_defaults() {
    let file = toml_file(
        r#"
pending_slot = "read_only"
warn_on_overwrite = false

[logging]
level = "implementors_registry=trace"
format = "json"
"#,
    );

    let config = PublisherConfig::load_with_env(Some(file.path()), no_env()).unwrap();

    assert_eq!(config.pending_slot, SlotAccess::ReadOnly);
    assert!(!config.warn_on_overwrite);
    assert_eq!(
        config.logging.level.as_deref(),
        Some("implementors_registry=trace")
    );
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let file = toml_file("warn_on_overwrite = false\n");

    let config = PublisherConfig::load_with_env(Some(file.path()), no_env()).unwrap();

    assert_eq!(config.pending_slot, SlotAccess::ReadWrite);
    assert!(!config.warn_on_overwrite);
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn environment_overrides_file() {
    let file = toml_file("pending_slot = \"read_only\"\n");
    let env = HashMap::from([(
        "IMPLEMENTORS__PENDING_SLOT".to_string(),
        "read_write".to_string(),
    )]);

    let config = PublisherConfig::load_with_env(Some(file.path()), Some(env)).unwrap();

    assert_eq!(config.pending_slot, SlotAccess::ReadWrite);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let result = PublisherConfig::load_with_env(Some(missing.as_path()), no_env());

    assert!(matches!(result, Err(ConfigurationError::Load(_))));
}

#[test]
fn invalid_level_in_file_is_rejected() {
    let file = toml_file("[logging]\nlevel = \"implementors_registry=loud\"\n");

    let result = PublisherConfig::load_with_env(Some(file.path()), no_env());

    assert!(matches!(
        result,
        Err(ConfigurationError::InvalidValue { ref field, .. }) if field == "logging.level"
    ));
}
