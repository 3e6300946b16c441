//! Tests for engine configuration.

use std::io::Write;

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "reproducible"
        index_joins = false
    "#;

    let config = StreamConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert!(!config.index_joins);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: fast_assert
    "#;

    let config = StreamConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FastAssert);
    assert!(config.index_joins);
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = StreamConfig::from_toml_str("").unwrap();
    assert_eq!(config, StreamConfig::default());
    assert_eq!(config.environment_mode, EnvironmentMode::NonReproducible);
    assert!(config.index_joins);
}

#[test]
fn test_builder() {
    let config = StreamConfig::new()
        .with_environment_mode(EnvironmentMode::FullAssert)
        .with_index_joins(true);

    assert!(config.environment_mode.is_asserted());
    assert!(config.index_joins);
    assert!(!EnvironmentMode::Reproducible.is_asserted());
}

#[test]
fn test_asserted_mode_requires_indexing() {
    let toml = r#"
        environment_mode = "full_assert"
        index_joins = false
    "#;

    let err = StreamConfig::from_toml_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let stream_err: StreamError = err.into();
    assert!(matches!(stream_err, StreamError::Config(_)));
    assert!(!stream_err.is_consistency_error());
}

#[test]
fn test_unknown_mode_rejected() {
    let err = StreamConfig::from_toml_str(r#"environment_mode = "turbo""#).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file() {
    let err = StreamConfig::load("definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("streamforge-config-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "environment_mode = \"reproducible\"").unwrap();
    drop(file);

    let config = StreamConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
}
