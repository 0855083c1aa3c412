//! Integration tests for logging configuration

use quire::config::{CatalogConfig, LoggingConfig, QuireConfig};
use tempfile::TempDir;

fn config_with_logging(logging: LoggingConfig) -> QuireConfig {
    QuireConfig {
        application: Default::default(),
        site: Default::default(),
        catalog: CatalogConfig {
            path: "catalog.json".to_string(),
            documents_dir: "documents".to_string(),
        },
        export: Default::default(),
        logging,
    }
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "./logs");
}

#[test]
fn test_logging_directory_not_created_by_validation() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = config_with_logging(LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "hourly".to_string(),
    });

    assert!(config.validate().is_ok());
    assert!(!log_path.exists());
}

#[test]
fn test_invalid_rotation_rejected() {
    let config = config_with_logging(LoggingConfig {
        local_rotation: "weekly".to_string(),
        ..LoggingConfig::default()
    });

    let err = config.validate().unwrap_err();
    assert!(err.contains("local_rotation"));
}

#[test]
fn test_empty_path_rejected_only_when_enabled() {
    let disabled = config_with_logging(LoggingConfig {
        local_enabled: false,
        local_path: String::new(),
        local_rotation: "never".to_string(),
    });
    assert!(disabled.validate().is_ok());

    let enabled = config_with_logging(LoggingConfig {
        local_enabled: true,
        ..disabled.logging.clone()
    });
    assert!(enabled.validate().is_err());
}
