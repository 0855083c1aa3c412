//! Domain models and types for Quire.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PaperId`], [`ReviewId`])
//! - **Records** ([`Paper`], [`AttachmentRef`], [`Review`], [`ReviewForm`])
//! - **Callers** ([`Contact`])
//! - **Export values** ([`Selection`], [`ResultEntry`], [`Manifest`])
//! - **Error types** ([`QuireError`], [`CatalogError`]) and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use quire::domain::{Manifest, PaperId, ResultEntry, Selection};
//!
//! # fn example() -> quire::domain::Result<()> {
//! let selection = Selection::parse("9")?;
//! let pid = selection.ids()[0];
//! let manifest = Manifest::from_entries(vec![ResultEntry::denied(pid)]);
//! assert_eq!(manifest.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod contact;
pub mod document;
pub mod entry;
pub mod errors;
pub mod ids;
pub mod paper;
pub mod result;
pub mod review;
pub mod selection;

// Re-export commonly used types for convenience
pub use contact::{Contact, Role};
pub use document::{AttachmentRef, DocumentKind};
pub use entry::{Manifest, ResultEntry, INTERNAL_ERROR, PERMISSION_DENIED};
pub use errors::{CatalogError, QuireError};
pub use ids::{PaperId, ReviewId};
pub use paper::{Author, OptionValue, Paper, PaperBuilder, PaperOption, PaperStatus};
pub use result::Result;
pub use review::{FieldKind, FieldVisibility, Review, ReviewField, ReviewForm};
pub use selection::Selection;
