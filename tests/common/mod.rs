//! In-memory collaborators shared by the export integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use quire::adapters::traits::{
    AuthorizationOracle, DocumentStore, RecordSource, ReviewSource, Transport,
};
use quire::core::emit::Download;
use quire::core::export::{ExportAssembler, ExportSettings};
use quire::domain::{
    AttachmentRef, CatalogError, Contact, Paper, PaperId, QuireError, Result, Review, ReviewForm,
    Role,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub fn pid(n: u64) -> PaperId {
    PaperId::new(n).unwrap()
}

pub fn chair() -> Contact {
    Contact::new("chair@example.org").with_role(Role::Chair)
}

pub fn pdf(key: &str, size: u64) -> AttachmentRef {
    AttachmentRef::new(key, "application/pdf", size)
}

/// Papers returned in reverse id order, optionally repeated
pub struct MemoryRecords {
    papers: Vec<Paper>,
    repeat: bool,
}

impl MemoryRecords {
    pub fn new(papers: Vec<Paper>) -> Self {
        Self {
            papers,
            repeat: false,
        }
    }

    /// Returns every matching paper twice
    pub fn with_duplicates(mut self) -> Self {
        self.repeat = true;
        self
    }
}

#[async_trait]
impl RecordSource for MemoryRecords {
    async fn fetch_papers(&self, ids: &[PaperId]) -> Result<Vec<Paper>> {
        let mut found: Vec<Paper> = self
            .papers
            .iter()
            .filter(|p| ids.contains(&p.pid))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.pid.cmp(&a.pid));
        if self.repeat {
            let copies = found.clone();
            found.extend(copies);
        }
        Ok(found)
    }
}

/// Record source that always fails
pub struct BrokenRecords;

#[async_trait]
impl RecordSource for BrokenRecords {
    async fn fetch_papers(&self, _ids: &[PaperId]) -> Result<Vec<Paper>> {
        Err(CatalogError::ReadFailed("connection reset".to_string()).into())
    }
}

/// Oracle with a fixed set of administrable papers
pub struct FixedOracle {
    manager: bool,
    administers: HashSet<PaperId>,
    hidden_reviewers: HashSet<String>,
}

impl FixedOracle {
    /// Manager who administers the given papers
    pub fn administering(ids: &[u64]) -> Self {
        Self {
            manager: true,
            administers: ids.iter().map(|n| pid(*n)).collect(),
            hidden_reviewers: HashSet::new(),
        }
    }

    /// Caller who may not export at all
    pub fn outsider() -> Self {
        Self {
            manager: false,
            administers: HashSet::new(),
            hidden_reviewers: HashSet::new(),
        }
    }

    /// Hides reviews written by `email` from the caller
    pub fn hiding_reviews_by(mut self, email: &str) -> Self {
        self.hidden_reviewers.insert(email.to_string());
        self
    }
}

impl AuthorizationOracle for FixedOracle {
    fn is_manager(&self, _caller: &Contact) -> bool {
        self.manager
    }

    fn can_administer(&self, _caller: &Contact, paper: &Paper) -> bool {
        self.administers.contains(&paper.pid)
    }

    fn can_view_review(&self, _caller: &Contact, _paper: &Paper, review: &Review) -> bool {
        !self.hidden_reviewers.contains(&review.reviewer_email)
    }
}

/// Document store backed by a map; missing keys fail
#[derive(Default)]
pub struct MemoryDocuments {
    content: HashMap<String, Vec<u8>>,
}

impl MemoryDocuments {
    pub fn with(mut self, key: &str, content: &[u8]) -> Self {
        self.content.insert(key.to_string(), content.to_vec());
        self
    }
}

#[async_trait]
impl DocumentStore for MemoryDocuments {
    async fn load(&self, attachment: &AttachmentRef) -> Result<Vec<u8>> {
        self.content
            .get(&attachment.storage_key)
            .cloned()
            .ok_or_else(|| CatalogError::DocumentNotFound(attachment.storage_key.clone()).into())
    }
}

/// Reviews keyed by paper, with a fixed form
#[derive(Default)]
pub struct MemoryReviews {
    reviews: HashMap<PaperId, Vec<Review>>,
    form: ReviewForm,
}

impl MemoryReviews {
    pub fn new(form: ReviewForm) -> Self {
        Self {
            reviews: HashMap::new(),
            form,
        }
    }

    pub fn with(mut self, paper: u64, review: Review) -> Self {
        self.reviews.entry(pid(paper)).or_default().push(review);
        self
    }
}

#[async_trait]
impl ReviewSource for MemoryReviews {
    async fn fetch_reviews(&self, pid: PaperId) -> Result<Vec<Review>> {
        Ok(self.reviews.get(&pid).cloned().unwrap_or_default())
    }

    async fn review_form(&self) -> Result<ReviewForm> {
        Ok(self.form.clone())
    }
}

/// Transport that keeps every delivered artifact
#[derive(Default)]
pub struct CapturingTransport {
    pub delivered: Vec<Download>,
    pub fail: bool,
}

impl CapturingTransport {
    pub fn failing() -> Self {
        Self {
            delivered: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl Transport for CapturingTransport {
    async fn deliver(&mut self, download: &Download) -> Result<()> {
        if self.fail {
            return Err(QuireError::Transport("client went away".to_string()));
        }
        self.delivered.push(download.clone());
        Ok(())
    }
}

/// Assembler over in-memory collaborators
pub fn assembler(
    records: impl RecordSource + 'static,
    oracle: impl AuthorizationOracle + 'static,
    documents: MemoryDocuments,
    settings: ExportSettings,
) -> ExportAssembler {
    ExportAssembler::new(
        Arc::new(records),
        Arc::new(oracle),
        Arc::new(documents),
        settings,
    )
}
