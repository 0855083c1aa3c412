//! Artifact transports
//!
//! [`DirectoryTransport`] writes the artifact into a directory under its
//! disposition filename. [`WriterTransport`] streams it to any async writer
//! (stdout for the CLI).

use crate::adapters::traits::Transport;
use crate::core::emit::Download;
use crate::domain::{QuireError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes artifacts into an output directory
#[derive(Debug, Clone)]
pub struct DirectoryTransport {
    dir: PathBuf,
    delivered: Vec<PathBuf>,
}

impl DirectoryTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            delivered: Vec::new(),
        }
    }

    /// Paths written so far
    pub fn delivered(&self) -> &[PathBuf] {
        &self.delivered
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl Transport for DirectoryTransport {
    async fn deliver(&mut self, download: &Download) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            QuireError::Transport(format!("{}: {}", self.dir.display(), e))
        })?;

        let target = self.dir.join(&download.filename);
        let partial = self.dir.join(format!(".{}.partial", download.filename));

        // Write aside, then rename, so the target never holds a partial artifact.
        if let Err(e) = tokio::fs::write(&partial, &download.body).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(QuireError::Transport(format!("{}: {}", partial.display(), e)));
        }
        tokio::fs::rename(&partial, &target)
            .await
            .map_err(|e| QuireError::Transport(format!("{}: {}", target.display(), e)))?;

        tracing::info!(
            path = %target.display(),
            bytes = download.body.len(),
            content_type = %download.content_type,
            "Artifact written"
        );
        self.delivered.push(target);
        Ok(())
    }
}

/// Streams the artifact body to an async writer
pub struct WriterTransport<W> {
    writer: W,
}

impl<W> WriterTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterTransport<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> Transport for WriterTransport<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn deliver(&mut self, download: &Download) -> Result<()> {
        tracing::debug!(
            content_disposition = %download.content_disposition(),
            content_type = %download.content_type,
            "Streaming artifact"
        );
        self.writer
            .write_all(&download.body)
            .await
            .map_err(|e| QuireError::Transport(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| QuireError::Transport(e.to_string()))?;
        Ok(())
    }
}
