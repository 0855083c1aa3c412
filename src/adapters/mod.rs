//! External system integrations for Quire.
//!
//! The export pipeline depends only on the traits in [`traits`]. This module
//! also provides the adapters the CLI uses:
//!
//! - [`catalog`] - JSON catalog file (records, reviews, contacts, review form)
//!   and a filesystem document store
//! - [`transport`] - artifact delivery to a directory or a writer
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory fakes.
//!
//! ```rust,no_run
//! use quire::adapters::catalog::{CatalogStore, FsDocumentStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = CatalogStore::load("catalog.json").await?;
//! let documents = FsDocumentStore::new("documents");
//! let chair = catalog.contact("chair@example.org")?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod traits;
pub mod transport;

pub use traits::{AuthorizationOracle, DocumentStore, RecordSource, ReviewSource, Transport};
pub use transport::{DirectoryTransport, WriterTransport};
