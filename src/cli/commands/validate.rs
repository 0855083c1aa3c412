//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Quire configuration file and the catalog it points at.

use crate::adapters::catalog::CatalogStore;
use crate::config::load_config;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Only check the configuration file, not the catalog
    #[arg(long)]
    pub skip_catalog: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Download Prefix: {}",
            if config.site.download_prefix.is_empty() {
                "(none)"
            } else {
                config.site.download_prefix.as_str()
            }
        );
        println!("  Catalog: {}", config.catalog.path);
        println!("  Documents: {}", config.catalog.documents_dir);
        println!("  Max Concurrency: {}", config.export.max_concurrency);
        println!(
            "  Attachment Timeout: {}s",
            config.export.attachment_timeout_secs
        );
        println!("  Verify Hashes: {}", config.export.verify_hashes);
        println!();

        if self.skip_catalog {
            return Ok(0);
        }

        match CatalogStore::load(&config.catalog.path).await {
            Ok(catalog) => {
                println!("✅ Catalog loaded: {} papers", catalog.paper_count());
            }
            Err(e) => {
                println!("❌ Catalog could not be loaded");
                println!("   Error: {e}");
                return Ok(2);
            }
        }

        if !Path::new(&config.catalog.documents_dir).is_dir() {
            println!(
                "⚠️  Documents directory does not exist: {}",
                config.catalog.documents_dir
            );
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_config_is_a_configuration_error() {
        let args = ValidateArgs {
            skip_catalog: false,
        };
        let code = args.execute("/nonexistent/quire.toml").await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_valid_config_and_catalog() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("catalog.json"), r#"{"papers": []}"#).unwrap();
        let config_path = dir.path().join("quire.toml");
        std::fs::write(&config_path, "[catalog]\npath = \"catalog.json\"\n").unwrap();

        let args = ValidateArgs {
            skip_catalog: false,
        };
        let code = args.execute(config_path.to_str().unwrap()).await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_broken_catalog() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("catalog.json"), "not json").unwrap();
        let config_path = dir.path().join("quire.toml");
        std::fs::write(&config_path, "[catalog]\npath = \"catalog.json\"\n").unwrap();

        let args = ValidateArgs {
            skip_catalog: false,
        };
        assert_eq!(args.execute(config_path.to_str().unwrap()).await.unwrap(), 2);

        let lenient = ValidateArgs { skip_catalog: true };
        assert_eq!(lenient.execute(config_path.to_str().unwrap()).await.unwrap(), 0);
    }
}
