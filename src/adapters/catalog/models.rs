//! Catalog file format
//!
//! The catalog is a single JSON document:
//!
//! ```json
//! {
//!   "contacts": [{"email": "chair@example.org", "roles": ["chair"]}],
//!   "papers": [{"pid": 1, "title": "...", "reviews": [...]}],
//!   "review_form": {"fields": [...]}
//! }
//! ```

use crate::domain::{Contact, Paper, Review, ReviewForm};
use serde::{Deserialize, Serialize};

/// Root of the catalog file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogFile {
    #[serde(default)]
    pub contacts: Vec<Contact>,

    #[serde(default)]
    pub papers: Vec<CatalogPaper>,

    #[serde(default)]
    pub review_form: ReviewForm,
}

/// A paper together with its reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPaper {
    #[serde(flatten)]
    pub paper: Paper,

    #[serde(default)]
    pub reviews: Vec<Review>,
}
