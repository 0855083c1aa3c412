//! Document collection
//!
//! Loads attachment content for the archive. Every failure here is
//! per-attachment: the caller turns it into a warning and moves on.

use super::filename::{archive_filename, is_compressible};
use crate::adapters::traits::DocumentStore;
use crate::core::serialize::AttachmentRequest;
use crate::domain::{CatalogError, PaperId, QuireError, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

/// Attachment content ready for staging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    /// JSON pointer of the document object in the record's fields
    pub pointer: String,

    /// Desired archive entry name
    pub filename: String,

    pub content: Vec<u8>,

    pub compress: bool,
}

/// Loads attachments from a [`DocumentStore`]
#[derive(Clone)]
pub struct DocumentCollector {
    store: Arc<dyn DocumentStore>,
    prefix: String,
    timeout: Duration,
    verify_hashes: bool,
}

impl DocumentCollector {
    pub fn new(store: Arc<dyn DocumentStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            timeout: Duration::from_secs(30),
            verify_hashes: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_hash_verification(mut self, verify: bool) -> Self {
        self.verify_hashes = verify;
        self
    }

    /// Loads one attachment of paper `pid`
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails, the load times out, or the
    /// content doesn't match the recorded hash.
    pub async fn collect(&self, pid: PaperId, request: &AttachmentRequest) -> Result<LoadedDocument> {
        let doc = &request.attachment;
        let content = tokio::time::timeout(self.timeout, self.store.load(doc))
            .await
            .map_err(|_| QuireError::from(CatalogError::Timeout(self.timeout.as_secs())))??;

        if self.verify_hashes {
            if let Some(expected) = doc.sha256_hex() {
                let actual = hex_digest(&content);
                if !actual.eq_ignore_ascii_case(expected) {
                    return Err(QuireError::Export(format!(
                        "{} content does not match its recorded hash",
                        request.kind.label()
                    )));
                }
            }
        }

        let filename = archive_filename(&self.prefix, pid, &request.kind, doc);
        tracing::debug!(
            pid = %pid,
            document = %request.kind.label(),
            filename = %filename,
            bytes = content.len(),
            "Loaded document"
        );
        Ok(LoadedDocument {
            pointer: request.pointer.clone(),
            filename,
            content,
            compress: is_compressible(&doc.mimetype),
        })
    }
}

/// Writes `content_file` into each document object named by a rewrite
///
/// `rewrites` pairs a JSON pointer with the archive name the document was
/// staged under. Pointers that don't resolve to an object are ignored.
pub fn apply_rewrites(fields: &mut Map<String, Value>, rewrites: &[(String, String)]) {
    if rewrites.is_empty() {
        return;
    }
    let mut root = Value::Object(std::mem::take(fields));
    for (pointer, filename) in rewrites {
        if let Some(Value::Object(doc)) = root.pointer_mut(pointer) {
            doc.insert("content_file".to_string(), Value::String(filename.clone()));
        }
    }
    if let Value::Object(map) = root {
        *fields = map;
    }
}

fn hex_digest(content: &[u8]) -> String {
    Sha256::digest(content)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
