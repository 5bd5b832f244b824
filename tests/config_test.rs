use rxcheck::config::*;
use rxcheck::types::OutputFormat;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = RxCheckConfig::default();
    assert_eq!(config.version, CONFIG_VERSION);
    assert!(config.knowledge_path.is_none());
    assert!(!config.strict_classification);
    assert_eq!(config.output_format, OutputFormat::Markdown);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = load_config(&dir.path().join("config.json")).expect("failed to load config");
    assert_eq!(config, RxCheckConfig::default());
}

#[test]
fn test_save_and_load_config() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("nested").join(CONFIG_FILENAME);
    let config = RxCheckConfig {
        knowledge_path: Some("/tmp/knowledge.json".to_string()),
        strict_classification: true,
        output_format: OutputFormat::Json,
        ..RxCheckConfig::default()
    };
    save_config(&path, &config).expect("failed to save config");
    assert!(!path.with_extension("tmp").exists());

    let loaded = load_config(&path).expect("failed to load config");
    assert_eq!(config, loaded);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join(CONFIG_FILENAME);
    std::fs::write(&path, r#"{"strict_classification": true}"#).expect("failed to write file");

    let config = load_config(&path).expect("failed to load config");
    assert!(config.strict_classification);
    assert_eq!(config.max_response_chars, RxCheckConfig::default().max_response_chars);
}

#[test]
fn test_invalid_file_is_config_error() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join(CONFIG_FILENAME);
    std::fs::write(&path, "not json").expect("failed to write file");

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().starts_with("config error"));
}

#[test]
fn test_zero_response_limit_rejected() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join(CONFIG_FILENAME);
    std::fs::write(&path, r#"{"max_response_chars": 0}"#).expect("failed to write file");
    assert!(load_config(&path).is_err());
}

#[test]
fn test_default_config_path_location() {
    if let Some(path) = default_config_path() {
        assert!(path.ends_with("rxcheck/config.json"));
    }
}
