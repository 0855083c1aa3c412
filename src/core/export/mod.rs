//! Export orchestration
//!
//! This module provides the export logic for Quire, including:
//! - Named export actions
//! - Per-record processing with bounded concurrency
//! - The assembler that runs an export end to end
//! - The review-inclusive export
//! - Summary and reporting

pub mod action;
pub mod assembler;
pub mod extended;
pub mod pipeline;
pub mod summary;

pub use action::ExportAction;
pub use assembler::{ExportArtifact, ExportAssembler, ExportSettings, ExportStage};
pub use extended::{ReviewEnricher, RqcManifest};
pub use pipeline::{NoEnrichment, OutcomeStatus, RecordEnricher, RecordOutcome};
pub use summary::ExportSummary;
