//! Paper domain model
//!
//! A paper is the record the export pipeline works on. It is read-only to
//! the pipeline; the record source owns it.

use super::document::AttachmentRef;
use super::ids::PaperId;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaperStatus {
    /// Started but never submitted
    Draft,
    /// Submitted for review
    #[default]
    Submitted,
    /// Withdrawn by the authors
    Withdrawn,
    /// Accepted for publication
    Accepted,
    /// Rejected
    Rejected,
}

impl PaperStatus {
    /// Returns the status as it appears in exported JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperStatus::Draft => "draft",
            PaperStatus::Submitted => "submitted",
            PaperStatus::Withdrawn => "withdrawn",
            PaperStatus::Accepted => "accepted",
            PaperStatus::Rejected => "rejected",
        }
    }
}

/// A paper author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Author {
    /// Given name
    #[serde(default)]
    pub first: Option<String>,

    /// Family name
    #[serde(default)]
    pub last: Option<String>,

    /// Contact email
    #[serde(default)]
    pub email: Option<String>,

    /// Affiliation
    #[serde(default)]
    pub affiliation: Option<String>,
}

/// Value of a submission option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum OptionValue {
    Checkbox(bool),
    Text(String),
    Numeric(i64),
    Selector(String),
    /// A single attached document
    Document(AttachmentRef),
    /// Any number of attached documents
    Attachments(Vec<AttachmentRef>),
}

/// A submission option attached to a paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperOption {
    /// Option id; options are exported in id order
    pub id: u32,

    /// Human-readable option name
    pub name: String,

    /// Short key used in JSON output and archive filenames
    pub slug: String,

    /// Option value
    #[serde(flatten)]
    pub value: OptionValue,
}

/// A paper record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Paper id
    pub pid: PaperId,

    /// Title
    pub title: String,

    /// Abstract
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,

    /// Authors in byline order
    #[serde(default)]
    pub authors: Vec<Author>,

    /// Topic names
    #[serde(default)]
    pub topics: Vec<String>,

    /// Paper status
    #[serde(default)]
    pub status: PaperStatus,

    /// Email of the paper's administrator, if one is assigned
    #[serde(default)]
    pub manager: Option<String>,

    /// Emails of contacts with a conflict of interest
    #[serde(default)]
    pub conflicts: Vec<String>,

    /// Submitted version
    #[serde(default)]
    pub submission: Option<AttachmentRef>,

    /// Final (camera-ready) version
    #[serde(default, rename = "final")]
    pub final_version: Option<AttachmentRef>,

    /// Submission options
    #[serde(default)]
    pub options: Vec<PaperOption>,
}

impl Paper {
    /// Returns a builder for constructing a paper
    pub fn builder(pid: PaperId) -> PaperBuilder {
        PaperBuilder::new(pid)
    }

    /// Returns true if `email` has a conflict with this paper
    pub fn is_conflicted(&self, email: &str) -> bool {
        self.conflicts.iter().any(|c| c.eq_ignore_ascii_case(email))
    }
}

/// Builder for [`Paper`]
#[derive(Debug, Clone)]
pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    /// Creates a builder for an untitled submitted paper
    pub fn new(pid: PaperId) -> Self {
        Self {
            paper: Paper {
                pid,
                title: String::new(),
                abstract_text: None,
                authors: Vec::new(),
                topics: Vec::new(),
                status: PaperStatus::Submitted,
                manager: None,
                conflicts: Vec::new(),
                submission: None,
                final_version: None,
                options: Vec::new(),
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.paper.title = title.into();
        self
    }

    pub fn abstract_text(mut self, text: impl Into<String>) -> Self {
        self.paper.abstract_text = Some(text.into());
        self
    }

    pub fn author(mut self, author: Author) -> Self {
        self.paper.authors.push(author);
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.paper.topics.push(topic.into());
        self
    }

    pub fn status(mut self, status: PaperStatus) -> Self {
        self.paper.status = status;
        self
    }

    pub fn manager(mut self, email: impl Into<String>) -> Self {
        self.paper.manager = Some(email.into());
        self
    }

    pub fn conflict(mut self, email: impl Into<String>) -> Self {
        self.paper.conflicts.push(email.into());
        self
    }

    pub fn submission(mut self, doc: AttachmentRef) -> Self {
        self.paper.submission = Some(doc);
        self
    }

    pub fn final_version(mut self, doc: AttachmentRef) -> Self {
        self.paper.final_version = Some(doc);
        self
    }

    pub fn option(mut self, option: PaperOption) -> Self {
        self.paper.options.push(option);
        self
    }

    /// Builds the paper
    pub fn build(self) -> Paper {
        self.paper
    }
}
