//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels
//! - Console output on stderr
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use quire::logging::init_logging;
//! use quire::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export request
///
/// # Example
///
/// ```no_run
/// use quire::log_export_start;
///
/// log_export_start!("jsonattach", "chair@example.org", 12);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($action:expr, $caller:expr, $selected:expr) => {
        tracing::info!(
            action = %$action,
            caller = %$caller,
            selected = $selected,
            "Starting export"
        );
    };
}

/// Log the completion of an export request
///
/// # Example
///
/// ```no_run
/// use quire::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!("data.json", 42, Duration::from_millis(80));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($filename:expr, $entries:expr, $duration:expr) => {
        tracing::info!(
            filename = %$filename,
            entries = $entries,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use quire::log_error_with_context;
/// use quire::domain::QuireError;
///
/// let error = QuireError::Transport("broken pipe".to_string());
/// log_error_with_context!(&error, "Failed to deliver artifact");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
