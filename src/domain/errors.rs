//! Domain error types
//!
//! This module defines the error hierarchy for Quire. Adapter errors are
//! domain-specific and don't expose third-party types.

use super::ids::PaperId;
use thiserror::Error;

/// Main Quire error type
///
/// This is the primary error type used throughout the library. Per-record
/// and per-attachment failures never surface here; they become manifest
/// entries and archive warnings instead.
#[derive(Debug, Error)]
pub enum QuireError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Catalog (record source) errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The caller may not run the requested export at all
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Invalid input (selection, action name, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Archive framing errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// The transport could not deliver the artifact
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Catalog-specific errors
///
/// Errors raised by the file-backed record source, authorization and
/// document store adapters.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file missing or unreadable
    #[error("Failed to read catalog: {0}")]
    ReadFailed(String),

    /// Catalog file is not valid catalog JSON
    #[error("Invalid catalog format: {0}")]
    InvalidFormat(String),

    /// Two papers in the catalog share an id
    #[error("Duplicate paper id in catalog: {0}")]
    DuplicatePaper(PaperId),

    /// No contact with the given email
    #[error("Unknown contact: {0}")]
    UnknownContact(String),

    /// Document content could not be loaded
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Document load exceeded the configured timeout
    #[error("Document load timed out after {0}s")]
    Timeout(u64),
}

impl From<std::io::Error> for QuireError {
    fn from(err: std::io::Error) -> Self {
        QuireError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for QuireError {
    fn from(err: serde_json::Error) -> Self {
        QuireError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for QuireError {
    fn from(err: toml::de::Error) -> Self {
        QuireError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<zip::result::ZipError> for QuireError {
    fn from(err: zip::result::ZipError) -> Self {
        QuireError::Archive(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quire_error_display() {
        let err = QuireError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_catalog_error_conversion() {
        let catalog_err = CatalogError::UnknownContact("nobody@example.org".to_string());
        let err: QuireError = catalog_err.into();
        assert!(matches!(err, QuireError::Catalog(_)));
        assert_eq!(
            err.to_string(),
            "Catalog error: Unknown contact: nobody@example.org"
        );
    }

    #[test]
    fn test_duplicate_paper_display() {
        let err = CatalogError::DuplicatePaper(PaperId::new(12).unwrap());
        assert_eq!(err.to_string(), "Duplicate paper id in catalog: 12");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: QuireError = io_err.into();
        assert!(matches!(err, QuireError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: QuireError = json_err.into();
        assert!(matches!(err, QuireError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: QuireError = toml_err.into();
        assert!(matches!(err, QuireError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_zip_error_conversion() {
        let zip_err = zip::result::ZipError::FileNotFound;
        let err: QuireError = zip_err.into();
        assert!(matches!(err, QuireError::Archive(_)));
    }

    #[test]
    fn test_quire_error_implements_std_error() {
        let err = QuireError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
