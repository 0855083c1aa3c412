//! Configuration management for Quire.
//!
//! Quire reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `QUIRE_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [site]
//! download_prefix = "conf26-"
//!
//! [catalog]
//! path = "catalog.json"
//! documents_dir = "documents"
//!
//! [export]
//! max_concurrency = 4
//! attachment_timeout_secs = 30
//! verify_hashes = true
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use quire::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("quire.toml")?;
//! println!("Catalog: {}", config.catalog.path);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CatalogConfig, ExportConfig, LoggingConfig, QuireConfig, SiteConfig,
};
