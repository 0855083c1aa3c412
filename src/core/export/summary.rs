//! Export summary and reporting
//!
//! Every export run produces an [`ExportSummary`] that is logged at the end
//! and returned to the caller.

use super::action::ExportAction;
use super::pipeline::OutcomeStatus;
use std::time::Duration;

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Requested action
    pub action: ExportAction,

    /// Number of ids in the selection, duplicates included
    pub selected: usize,

    /// Number of distinct selected papers the record source returned
    pub fetched: usize,

    /// Number of papers exported successfully
    pub exported: usize,

    /// Number of papers the caller may not administer
    pub denied: usize,

    /// Number of papers that failed to serialize
    pub failed: usize,

    /// Number of attachments written into the archive
    pub documents_staged: usize,

    /// Number of warnings recorded
    pub warnings: usize,

    /// Artifact filename
    pub filename: String,

    /// Artifact size in bytes
    pub bytes: usize,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(action: ExportAction, selected: usize) -> Self {
        Self {
            action,
            selected,
            fetched: 0,
            exported: 0,
            denied: 0,
            failed: 0,
            documents_staged: 0,
            warnings: 0,
            filename: String::new(),
            bytes: 0,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Count one processed record
    pub fn record(&mut self, status: OutcomeStatus) {
        match status {
            OutcomeStatus::Exported => self.exported += 1,
            OutcomeStatus::Denied => self.denied += 1,
            OutcomeStatus::Failed => self.failed += 1,
        }
    }

    /// Number of manifest entries
    pub fn entries(&self) -> usize {
        self.exported + self.denied + self.failed
    }

    /// True when every fetched paper was exported without warnings
    pub fn is_clean(&self) -> bool {
        self.denied == 0 && self.failed == 0 && self.warnings == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            action = %self.action,
            selected = self.selected,
            fetched = self.fetched,
            exported = self.exported,
            denied = self.denied,
            failed = self.failed,
            documents = self.documents_staged,
            warnings = self.warnings,
            filename = %self.filename,
            bytes = self.bytes,
            duration_ms = self.duration.as_millis() as u64,
            "Export summary"
        );

        if self.denied > 0 || self.failed > 0 {
            tracing::warn!(
                denied = self.denied,
                failed = self.failed,
                "Some papers were exported as error entries"
            );
        }
    }
}
