//! File-backed catalog store
//!
//! Implements [`RecordSource`], [`ReviewSource`] and [`AuthorizationOracle`]
//! over an in-memory copy of the catalog file.

use super::models::CatalogFile;
use crate::adapters::traits::{AuthorizationOracle, RecordSource, ReviewSource};
use crate::domain::{
    CatalogError, Contact, Paper, PaperId, Result, Review, ReviewForm,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// In-memory catalog
#[derive(Debug, Clone)]
pub struct CatalogStore {
    papers: BTreeMap<PaperId, Paper>,
    reviews: HashMap<PaperId, Vec<Review>>,
    contacts: Vec<Contact>,
    review_form: ReviewForm,
}

impl CatalogStore {
    /// Load a catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a catalog error if the file can't be read, isn't valid
    /// catalog JSON, or repeats a paper id.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::ReadFailed(format!("{}: {}", path.display(), e)))?;

        let file: CatalogFile = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::InvalidFormat(format!("{}: {}", path.display(), e)))?;

        let store = Self::from_file(file)?;
        tracing::info!(
            catalog = %path.display(),
            papers = store.papers.len(),
            contacts = store.contacts.len(),
            "Catalog loaded"
        );
        Ok(store)
    }

    /// Build a store from an already parsed catalog
    pub fn from_file(file: CatalogFile) -> Result<Self> {
        let mut papers = BTreeMap::new();
        let mut reviews = HashMap::new();

        for entry in file.papers {
            let pid = entry.paper.pid;
            if papers.insert(pid, entry.paper).is_some() {
                return Err(CatalogError::DuplicatePaper(pid).into());
            }
            if !entry.reviews.is_empty() {
                reviews.insert(pid, entry.reviews);
            }
        }

        Ok(Self {
            papers,
            reviews,
            contacts: file.contacts,
            review_form: file.review_form,
        })
    }

    /// Resolve a caller by email
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownContact`] if no contact has that email.
    pub fn contact(&self, email: &str) -> Result<Contact> {
        self.contacts
            .iter()
            .find(|c| c.has_email(email))
            .cloned()
            .ok_or_else(|| CatalogError::UnknownContact(email.to_string()).into())
    }

    /// Number of papers in the catalog
    pub fn paper_count(&self) -> usize {
        self.papers.len()
    }

    fn manages(caller: &Contact, paper: &Paper) -> bool {
        paper
            .manager
            .as_deref()
            .is_some_and(|email| caller.has_email(email))
    }
}

#[async_trait]
impl RecordSource for CatalogStore {
    async fn fetch_papers(&self, ids: &[PaperId]) -> Result<Vec<Paper>> {
        // Catalog (id) order, never selection order.
        let papers: Vec<Paper> = self
            .papers
            .values()
            .filter(|p| ids.contains(&p.pid))
            .cloned()
            .collect();
        tracing::debug!(requested = ids.len(), found = papers.len(), "Fetched papers");
        Ok(papers)
    }
}

#[async_trait]
impl ReviewSource for CatalogStore {
    async fn fetch_reviews(&self, pid: PaperId) -> Result<Vec<Review>> {
        Ok(self.reviews.get(&pid).cloned().unwrap_or_default())
    }

    async fn review_form(&self) -> Result<ReviewForm> {
        Ok(self.review_form.clone())
    }
}

impl AuthorizationOracle for CatalogStore {
    fn is_manager(&self, caller: &Contact) -> bool {
        caller.is_chair() || self.papers.values().any(|p| Self::manages(caller, p))
    }

    fn can_administer(&self, caller: &Contact, paper: &Paper) -> bool {
        caller.is_chair() || Self::manages(caller, paper)
    }

    fn can_view_review(&self, caller: &Contact, paper: &Paper, review: &Review) -> bool {
        if self.can_administer(caller, paper) || caller.has_email(&review.reviewer_email) {
            return true;
        }
        caller.is_pc() && review.submitted && !paper.is_conflicted(&caller.email)
    }
}
