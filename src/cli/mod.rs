//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Quire using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Quire - paper export tool
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(version, about, long_about = None)]
#[command(author = "Quire Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "quire.toml", env = "QUIRE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "QUIRE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export selected papers as JSON or a ZIP archive
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// List available export actions
    Actions(commands::actions::ActionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["quire", "export", "-p", "1", "-u", "chair@example.org"]);
        assert_eq!(cli.config, "quire.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["quire", "--config", "custom.toml", "actions"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["quire", "--log-level", "debug", "actions"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["quire", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["quire", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_export_requires_papers() {
        assert!(Cli::try_parse_from(["quire", "export", "-u", "chair@example.org"]).is_err());
    }
}
