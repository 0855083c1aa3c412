// Quire - Paper Export Tool
// Copyright (c) 2026 Quire Contributors
// Licensed under the MIT License

//! # Quire - Paper Export Tool
//!
//! Quire exports a caller-selected batch of conference papers into a single
//! downloadable artifact: a JSON manifest, or a ZIP archive holding the
//! manifest together with every attached document.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Gating** each paper on an externally computed authorization decision
//! - **Serializing** papers into deterministic, ordered JSON
//! - **Collecting** attachments into a ZIP archive with stable entry names
//! - **Ordering** results to match the caller's selection exactly
//! - **Exporting** review data for reviewqualitycollector.org
//!
//! ## Architecture
//!
//! Quire follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (serialization, collection, ordering, emission)
//! - [`adapters`] - Collaborator traits and the file-backed catalog adapters
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quire::adapters::catalog::{CatalogStore, FsDocumentStore};
//! use quire::config::load_config;
//! use quire::core::export::{ExportAction, ExportAssembler, ExportSettings};
//! use quire::domain::Selection;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("quire.toml")?;
//!     let catalog = Arc::new(CatalogStore::load(&config.catalog.path).await?);
//!     let caller = catalog.contact("chair@example.org")?;
//!
//!     let assembler = ExportAssembler::new(
//!         catalog.clone(),
//!         catalog.clone(),
//!         Arc::new(FsDocumentStore::new(&config.catalog.documents_dir)),
//!         ExportSettings::from_config(&config),
//!     );
//!
//!     let artifact = assembler
//!         .build(&caller, ExportAction::Json, &Selection::parse("5,3")?)
//!         .await?;
//!     println!("{} ({} bytes)", artifact.download.filename, artifact.download.body.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Problems with a single attachment become archive warnings, problems with
//! a single paper become error entries in the manifest, and only
//! request-level failures surface as [`domain::QuireError`].
//!
//! ## Logging
//!
//! Quire uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(action = "jsonattach", "Starting export");
//! warn!(pid = 9, "Permission denied");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
