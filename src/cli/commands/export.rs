//! Export command implementation
//!
//! This module implements the `export` command: it loads the catalog,
//! resolves the caller, runs the requested export action over the selected
//! papers and delivers the artifact to a directory or to stdout.

use crate::adapters::catalog::{CatalogStore, FsDocumentStore};
use crate::adapters::traits::Transport;
use crate::adapters::{DirectoryTransport, WriterTransport};
use crate::config::load_config;
use crate::core::export::{ExportAction, ExportAssembler, ExportSettings, ExportSummary};
use crate::domain::{QuireError, Selection};
use clap::Args;
use std::io::Write;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export action (json, jsonattach, jsonrqc)
    #[arg(short, long, default_value = "json")]
    pub action: String,

    /// Papers to export, in order (e.g. "5,3,5" or "1-4 9")
    #[arg(short, long)]
    pub papers: String,

    /// Email of the contact running the export
    #[arg(short, long, env = "QUIRE_USER")]
    pub user: String,

    /// Directory to write the artifact into
    #[arg(short, long, default_value = ".", conflicts_with = "stdout")]
    pub output_dir: String,

    /// Write the artifact to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let action: ExportAction = match self.action.parse() {
            Ok(a) => a,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };
        let selection = match Selection::parse(&self.papers) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let catalog = match CatalogStore::load(&config.catalog.path).await {
            Ok(c) => Arc::new(c),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load catalog");
                eprintln!("Failed to load catalog: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let caller = match catalog.contact(&self.user) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(user = %self.user, error = %e, "Unknown caller");
                eprintln!("Authorization error: {e}");
                return Ok(3); // Authorization error exit code
            }
        };

        let assembler = ExportAssembler::new(
            catalog.clone(),
            catalog.clone(),
            Arc::new(FsDocumentStore::new(&config.catalog.documents_dir)),
            ExportSettings::from_config(&config),
        )
        .with_reviews(catalog);

        let mut directory;
        let mut stdout;
        let transport: &mut dyn Transport = if self.stdout {
            stdout = WriterTransport::stdout();
            &mut stdout
        } else {
            directory = DirectoryTransport::new(&self.output_dir);
            &mut directory
        };

        let summary = match assembler
            .export(&caller, action, &selection, transport)
            .await
        {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code(&e));
            }
        };

        // Keep stdout clean when it carries the artifact.
        if self.stdout {
            print_summary(&mut std::io::stderr(), &summary, None)?;
        } else {
            print_summary(&mut std::io::stdout(), &summary, Some(&self.output_dir))?;
        }

        Ok(0)
    }
}

/// Process exit code for a request-level failure
pub fn exit_code(error: &QuireError) -> i32 {
    match error {
        QuireError::Configuration(_) | QuireError::Validation(_) => 2,
        QuireError::Authorization(_) => 3,
        _ => 5,
    }
}

fn print_summary(
    out: &mut impl Write,
    summary: &ExportSummary,
    output_dir: Option<&str>,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "📊 Export Summary:")?;
    writeln!(out, "  Action: {} ({})", summary.action, summary.action.description())?;
    writeln!(out, "  Selected: {}", summary.selected)?;
    writeln!(out, "  Found: {}", summary.fetched)?;
    writeln!(out, "  Exported: {}", summary.exported)?;
    writeln!(out, "  Permission Denied: {}", summary.denied)?;
    writeln!(out, "  Failed: {}", summary.failed)?;
    if summary.action.is_archive() {
        writeln!(out, "  Attachments: {}", summary.documents_staged)?;
        writeln!(out, "  Warnings: {}", summary.warnings)?;
    }
    writeln!(out, "  Duration: {:.2}s", summary.duration.as_secs_f64())?;
    match output_dir {
        Some(dir) => writeln!(out, "  Written: {}/{} ({} bytes)", dir, summary.filename, summary.bytes)?,
        None => writeln!(out, "  Written: {} to stdout ({} bytes)", summary.filename, summary.bytes)?,
    }
    writeln!(out)?;

    if summary.is_clean() {
        writeln!(out, "✅ Export completed successfully!")?;
    } else {
        writeln!(out, "⚠️  Export completed with error entries or warnings")?;
    }
    Ok(())
}
