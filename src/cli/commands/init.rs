//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "quire.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Quire configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [catalog] path at your catalog JSON file");
                println!("  2. Point [catalog] documents_dir at the attachment store");
                println!("  3. Validate configuration: quire validate-config");
                println!("  4. Run an export: quire export --papers 1-10 --user chair@example.org");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Quire Configuration File
# Paper export tool

[application]
log_level = "info"

[site]
download_prefix = ""

[catalog]
path = "catalog.json"
documents_dir = "documents"

[export]
max_concurrency = 4
attachment_timeout_secs = 30
verify_hashes = true

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Quire Configuration File
# Paper export tool
#
# This file contains all configuration options with examples and explanations.
# Values may reference environment variables with ${VAR}, and any setting can
# be overridden with QUIRE_<SECTION>_<KEY> (e.g. QUIRE_EXPORT_MAX_CONCURRENCY).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Site Settings
# ============================================================================
[site]
# Prefix for every download and archive entry name, e.g. "icfp26-"
# yields icfp26-data.zip and icfp26-paper5.pdf
download_prefix = ""

# Source commit reported by the jsonrqc export (defaults to the build commit)
# commit = "${QUIRE_COMMIT}"

# ============================================================================
# Catalog Settings
# ============================================================================
[catalog]
# Catalog JSON file with papers, reviews, contacts and the review form.
# Relative paths are resolved against this file's directory.
path = "catalog.json"

# Directory holding attachment content, one file per storage key
documents_dir = "documents"

# ============================================================================
# Export Settings
# ============================================================================
[export]
# Papers processed concurrently (1-64)
max_concurrency = 4

# Per-attachment load timeout in seconds (1-600)
attachment_timeout_secs = 30

# Reject attachments whose content doesn't match the recorded sha2 hash
verify_hashes = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuireConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_configs_parse_and_validate() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: QuireConfig = toml::from_str(&content).unwrap();
            config.validate().unwrap();
            assert_eq!(config.export.max_concurrency, 4);
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("quire.toml");
        std::fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "existing");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), 0);
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("[catalog]"));
    }
}
