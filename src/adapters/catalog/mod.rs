//! File-backed catalog adapters
//!
//! A JSON catalog file provides papers, reviews, contacts and the review
//! form; a documents directory provides attachment content.

pub mod documents;
pub mod models;
pub mod store;

pub use documents::FsDocumentStore;
pub use models::{CatalogFile, CatalogPaper};
pub use store::CatalogStore;
