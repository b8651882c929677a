use super::{config_stub, load_config, validate_config, PrepareConfig};
use tempfile::TempDir;

fn write_config(dir: &TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("texprep.json");
    std::fs::write(&path, text.as_bytes()).expect("write config");
    path
}

#[test]
fn default_config_is_valid() {
    validate_config(&PrepareConfig::default()).expect("defaults validate");
}

#[test]
fn stub_round_trips_through_load() {
    let dir = TempDir::new().expect("tempdir");
    let stub = config_stub().expect("stub");
    let path = write_config(&dir, &stub);
    let loaded = load_config(&path).expect("load stub");
    assert_eq!(loaded, PrepareConfig::default());
}

#[test]
fn missing_fields_take_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(&dir, r#"{ "conventional_names": ["paper.tex"] }"#);
    let loaded = load_config(&path).expect("load partial config");
    assert_eq!(loaded.conventional_names, vec!["paper.tex".to_string()]);
    assert_eq!(loaded.document_marker, "\\documentclass");
    assert_eq!(loaded.companion_extension, "bbl");
}

#[test]
fn rejects_unknown_schema_version() {
    let config = PrepareConfig {
        schema_version: 7,
        ..PrepareConfig::default()
    };
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("schema_version 7"));
}

#[test]
fn rejects_nested_conventional_names() {
    let config = PrepareConfig {
        conventional_names: vec!["src/main.tex".to_string()],
        ..PrepareConfig::default()
    };
    assert!(validate_config(&config).is_err());

    let config = PrepareConfig {
        conventional_names: vec!["main.ltx".to_string()],
        ..PrepareConfig::default()
    };
    assert!(validate_config(&config).is_err());
}

#[test]
fn rejects_dotted_companion_extension() {
    let config = PrepareConfig {
        companion_extension: ".bbl".to_string(),
        ..PrepareConfig::default()
    };
    assert!(validate_config(&config).is_err());
}

#[test]
fn rejects_empty_archive_suffixes() {
    let config = PrepareConfig {
        archive_suffixes: Vec::new(),
        ..PrepareConfig::default()
    };
    assert!(validate_config(&config).is_err());
}

#[test]
fn load_reports_malformed_json() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(&dir, "{ not json");
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("parse texprep config JSON"));
}
