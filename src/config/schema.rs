//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `quire.toml`.

use serde::{Deserialize, Serialize};

/// Main Quire configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuireConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Site-wide naming settings
    #[serde(default)]
    pub site: SiteConfig,

    /// Catalog (record source) location
    pub catalog: CatalogConfig,

    /// Export pipeline settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl QuireConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.site.validate()?;
        self.catalog.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    /// Prefix prepended to every download and archive entry name
    #[serde(default)]
    pub download_prefix: String,

    /// Source commit reported by the review-inclusive export; overrides the
    /// commit baked in at build time
    #[serde(default)]
    pub commit: Option<String>,
}

impl SiteConfig {
    fn validate(&self) -> Result<(), String> {
        if self
            .download_prefix
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '"') || c.is_control())
        {
            return Err(format!(
                "site.download_prefix '{}' must not contain path separators, quotes or control characters",
                self.download_prefix
            ));
        }
        Ok(())
    }
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog JSON file
    pub path: String,

    /// Directory holding document content, keyed by storage key
    #[serde(default = "default_documents_dir")]
    pub documents_dir: String,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("catalog.path cannot be empty".to_string());
        }
        if self.documents_dir.trim().is_empty() {
            return Err("catalog.documents_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Export pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Records processed concurrently (1-64)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-attachment load timeout in seconds (1-600)
    #[serde(default = "default_attachment_timeout_secs")]
    pub attachment_timeout_secs: u64,

    /// Reject attachments whose content doesn't match the recorded hash
    #[serde(default = "default_true")]
    pub verify_hashes: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            attachment_timeout_secs: default_attachment_timeout_secs(),
            verify_hashes: true,
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 || self.max_concurrency > 64 {
            return Err(format!(
                "export.max_concurrency must be between 1 and 64, got {}",
                self.max_concurrency
            ));
        }
        if self.attachment_timeout_secs == 0 || self.attachment_timeout_secs > 600 {
            return Err(format!(
                "export.attachment_timeout_secs must be between 1 and 600, got {}",
                self.attachment_timeout_secs
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_documents_dir() -> String {
    "documents".to_string()
}

fn default_max_concurrency() -> usize {
    4
}

fn default_attachment_timeout_secs() -> u64 {
    30
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
