//! Filesystem document store
//!
//! Attachment content lives under a root directory, one file per storage key.

use crate::adapters::traits::DocumentStore;
use crate::domain::{AttachmentRef, CatalogError, Result};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Document store backed by a directory
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a storage key to a path under the root.
    ///
    /// Keys must be relative and may not climb out of the root.
    fn resolve(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(CatalogError::DocumentNotFound(format!("invalid storage key {key:?}")).into());
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn load(&self, attachment: &AttachmentRef) -> Result<Vec<u8>> {
        let path = self.resolve(&attachment.storage_key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CatalogError::DocumentNotFound(attachment.storage_key.clone()).into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
