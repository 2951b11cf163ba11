//! Loading and saving configuration files on disk.

use gofont_catalog::FontSort;
use gofont_config::{Config, ConfigError, LogLevel};
use std::fs;

#[test]
fn test_missing_file_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("GOOGLE_FONTS_API_KEY"));
    assert!(written.contains("page_size: 20"));
    assert!(!written.contains("sample_text"));
}

#[test]
fn test_save_then_load_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let mut config = Config::default();
    config.google_fonts_api_key = "abc123".to_string();
    config.page_size = 7;
    config.default_sort = FontSort::Newest;
    config.sample_text = Some("Sphinx of black quartz".to_string());
    config.download_directory = Some("/srv/fonts".to_string());
    config.log_level = LogLevel::Info;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_invalid_file_reports_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "page_size: 0\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    let cfg_err = err.downcast_ref::<ConfigError>().unwrap();
    assert!(matches!(cfg_err, ConfigError::Validation(_)));
}

#[test]
fn test_env_default_is_applied_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "font_size: ${GOFONT_TEST_SURELY_UNSET_SIZE:-18px}\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.font_size, "18px");
}
