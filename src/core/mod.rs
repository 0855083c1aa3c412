//! Core business logic for Quire.
//!
//! # Modules
//!
//! - [`serialize`] - Paper and review serialization into ordered JSON
//! - [`collect`] - Attachment loading, archive naming and staging
//! - [`order`] - Projection of keyed results into selection order
//! - [`emit`] - JSON and ZIP artifact framing
//! - [`export`] - Export actions and orchestration
//!
//! # Export Workflow
//!
//! 1. **Gate**: The caller must be allowed to export at all
//! 2. **Fetch**: Load the selected papers from the record source
//! 3. **Process**: Authorize, serialize and collect attachments per paper
//! 4. **Reorder**: Put entries in the caller's selection order
//! 5. **Name**: Decide the manifest and artifact filenames
//! 6. **Emit**: Build the JSON or ZIP artifact and hand it to a transport
//!
//! # Example
//!
//! ```rust,no_run
//! use quire::adapters::catalog::{CatalogStore, FsDocumentStore};
//! use quire::adapters::DirectoryTransport;
//! use quire::core::export::{ExportAction, ExportAssembler, ExportSettings};
//! use quire::domain::Selection;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(CatalogStore::load("catalog.json").await?);
//! let caller = catalog.contact("chair@example.org")?;
//! let assembler = ExportAssembler::new(
//!     catalog.clone(),
//!     catalog.clone(),
//!     Arc::new(FsDocumentStore::new("documents")),
//!     ExportSettings::default(),
//! )
//! .with_reviews(catalog);
//!
//! let mut transport = DirectoryTransport::new("out");
//! let selection = Selection::parse("5,3,5")?;
//! let summary = assembler
//!     .export(&caller, ExportAction::JsonAttach, &selection, &mut transport)
//!     .await?;
//!
//! println!("Exported: {}", summary.exported);
//! println!("Denied: {}", summary.denied);
//! # Ok(())
//! # }
//! ```

pub mod collect;
pub mod emit;
pub mod export;
pub mod order;
pub mod serialize;
