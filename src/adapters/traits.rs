//! Collaborator traits
//!
//! The export pipeline talks to the outside world only through these
//! traits: where records come from, who may see them, where attachment
//! bytes live, and how the finished artifact leaves the process.

use crate::core::emit::Download;
use crate::domain::{AttachmentRef, Contact, Paper, PaperId, Result, Review, ReviewForm};
use async_trait::async_trait;

/// Source of paper records
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the papers with the given ids
    ///
    /// Ids that don't exist are skipped. The returned order is unspecified
    /// and callers must not rely on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be queried at all.
    async fn fetch_papers(&self, ids: &[PaperId]) -> Result<Vec<Paper>>;
}

/// Source of reviews and the review form
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// All reviews of a paper, submitted or not
    async fn fetch_reviews(&self, pid: PaperId) -> Result<Vec<Review>>;

    /// The site's review form
    async fn review_form(&self) -> Result<ReviewForm>;
}

/// Externally computed access decisions
pub trait AuthorizationOracle: Send + Sync {
    /// Whether the caller may run paper exports at all
    fn is_manager(&self, caller: &Contact) -> bool;

    /// Whether the caller may administer (and therefore export) a paper
    fn can_administer(&self, caller: &Contact, paper: &Paper) -> bool;

    /// Whether the caller may see a particular review of a paper
    fn can_view_review(&self, caller: &Contact, paper: &Paper, review: &Review) -> bool;
}

/// Store holding attachment content
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load the full content of an attachment
    ///
    /// # Errors
    ///
    /// Returns an error if the content is missing or unreadable. Callers
    /// treat this as a per-attachment failure.
    async fn load(&self, attachment: &AttachmentRef) -> Result<Vec<u8>>;
}

/// Delivers a finished artifact to its recipient
///
/// The artifact is complete when `deliver` is called; implementations
/// must not expose a partially written artifact.
#[async_trait]
pub trait Transport: Send {
    async fn deliver(&mut self, download: &Download) -> Result<()>;
}
