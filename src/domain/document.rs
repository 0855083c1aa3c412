//! Attachment references
//!
//! An [`AttachmentRef`] points at binary content held by the document store.
//! The `storage_key` is internal and never appears in exported JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference from a paper to a stored binary document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// MIME type of the content
    pub mimetype: String,

    /// Content length in bytes
    pub size: u64,

    /// Recorded content hash (`sha2-<hex>`)
    #[serde(default)]
    pub hash: Option<String>,

    /// Original upload filename
    #[serde(default)]
    pub filename: Option<String>,

    /// Upload time
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Key of the content in the document store
    pub storage_key: String,
}

impl AttachmentRef {
    /// Creates a reference with only the required fields set
    pub fn new(storage_key: impl Into<String>, mimetype: impl Into<String>, size: u64) -> Self {
        Self {
            mimetype: mimetype.into(),
            size,
            hash: None,
            filename: None,
            timestamp: None,
            storage_key: storage_key.into(),
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Returns the hex digest if the recorded hash is a SHA-256 (`sha2-`) hash
    pub fn sha256_hex(&self) -> Option<&str> {
        self.hash.as_deref().and_then(|h| h.strip_prefix("sha2-"))
    }
}

/// Where an attachment sits within a paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// The submitted version
    Submission,
    /// The final version
    Final,
    /// A document-valued option; `index` is set for multi-document options
    Option { slug: String, index: Option<usize> },
}

impl DocumentKind {
    /// Short label used in logs and warnings
    pub fn label(&self) -> String {
        match self {
            DocumentKind::Submission => "submission".to_string(),
            DocumentKind::Final => "final version".to_string(),
            DocumentKind::Option { slug, index: None } => slug.clone(),
            DocumentKind::Option {
                slug,
                index: Some(i),
            } => format!("{slug} #{}", i + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let doc = AttachmentRef::new("k", "application/pdf", 1).with_hash("sha2-abcd");
        assert_eq!(doc.sha256_hex(), Some("abcd"));

        let legacy = AttachmentRef::new("k", "application/pdf", 1).with_hash("0123");
        assert_eq!(legacy.sha256_hex(), None);
    }

    #[test]
    fn test_document_kind_label() {
        assert_eq!(DocumentKind::Submission.label(), "submission");
        assert_eq!(
            DocumentKind::Option {
                slug: "slides".to_string(),
                index: Some(1)
            }
            .label(),
            "slides #2"
        );
    }
}
