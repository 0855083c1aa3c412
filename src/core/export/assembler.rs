//! Export assembler - main orchestrator for an export request
//!
//! Runs the stages of an export strictly in order: fetch the selected
//! papers, process each record, put the results in selection order, decide
//! the artifact name, then emit the artifact. The artifact is complete
//! before a transport sees it.

use super::action::ExportAction;
use super::extended::{ReviewEnricher, RqcManifest};
use super::pipeline::{
    prepare_records, process_records, NoEnrichment, RecordContext, RecordEnricher, RecordOutcome,
};
use super::summary::ExportSummary;
use crate::adapters::traits::{
    AuthorizationOracle, DocumentStore, RecordSource, ReviewSource, Transport,
};
use crate::config::QuireConfig;
use crate::core::collect::{
    apply_rewrites, ArchiveStaging, DocumentCollector, StagedFile, WARNINGS_FILENAME,
};
use crate::core::emit::{build_archive, render_json, Download};
use crate::core::order::reorder;
use crate::core::serialize::serialize_review_form;
use crate::domain::{
    Contact, Manifest, PaperId, QuireError, Result, ResultEntry, ReviewForm, Selection,
};
use crate::{log_error_with_context, log_export_complete, log_export_start};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Stages of an export, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Init,
    Fetching,
    PerRecordProcessing,
    Reordering,
    NamingDecision,
    Emitting,
    Done,
}

impl ExportStage {
    /// The stage that follows this one
    pub fn next(self) -> Self {
        match self {
            ExportStage::Init => ExportStage::Fetching,
            ExportStage::Fetching => ExportStage::PerRecordProcessing,
            ExportStage::PerRecordProcessing => ExportStage::Reordering,
            ExportStage::Reordering => ExportStage::NamingDecision,
            ExportStage::NamingDecision => ExportStage::Emitting,
            ExportStage::Emitting | ExportStage::Done => ExportStage::Done,
        }
    }

    fn advance(&mut self) {
        let next = self.next();
        tracing::debug!(from = %self, to = %next, "Export stage");
        *self = next;
    }
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportStage::Init => "init",
            ExportStage::Fetching => "fetching",
            ExportStage::PerRecordProcessing => "per-record-processing",
            ExportStage::Reordering => "reordering",
            ExportStage::NamingDecision => "naming-decision",
            ExportStage::Emitting => "emitting",
            ExportStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Export settings
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Prefix of every download and archive entry name
    pub download_prefix: String,

    /// Records processed concurrently
    pub max_concurrency: usize,

    /// Per-attachment load timeout
    pub attachment_timeout: Duration,

    /// Check loaded attachments against their recorded hashes
    pub verify_hashes: bool,

    /// Commit reported by the review-inclusive export
    pub commit: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            download_prefix: String::new(),
            max_concurrency: 4,
            attachment_timeout: Duration::from_secs(30),
            verify_hashes: true,
            commit: None,
        }
    }
}

impl ExportSettings {
    pub fn from_config(config: &QuireConfig) -> Self {
        Self {
            download_prefix: config.site.download_prefix.clone(),
            max_concurrency: config.export.max_concurrency,
            attachment_timeout: Duration::from_secs(config.export.attachment_timeout_secs),
            verify_hashes: config.export.verify_hashes,
            commit: config.site.commit.clone(),
        }
    }
}

/// A built artifact and the summary of the run that built it
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub download: Download,
    pub summary: ExportSummary,
}

/// Export assembler
pub struct ExportAssembler {
    records: Arc<dyn RecordSource>,
    oracle: Arc<dyn AuthorizationOracle>,
    documents: Arc<dyn DocumentStore>,
    reviews: Option<Arc<dyn ReviewSource>>,
    settings: ExportSettings,
}

impl ExportAssembler {
    /// Create a new export assembler
    pub fn new(
        records: Arc<dyn RecordSource>,
        oracle: Arc<dyn AuthorizationOracle>,
        documents: Arc<dyn DocumentStore>,
        settings: ExportSettings,
    ) -> Self {
        Self {
            records,
            oracle,
            documents,
            reviews: None,
            settings,
        }
    }

    /// Enables the review-inclusive export
    pub fn with_reviews(mut self, reviews: Arc<dyn ReviewSource>) -> Self {
        self.reviews = Some(reviews);
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Builds and delivers an export
    ///
    /// # Errors
    ///
    /// Returns an error if the caller may not export, the record source
    /// fails, the artifact can't be built, or the transport fails.
    pub async fn export(
        &self,
        caller: &Contact,
        action: ExportAction,
        selection: &Selection,
        transport: &mut dyn Transport,
    ) -> Result<ExportSummary> {
        let artifact = self.build(caller, action, selection).await?;
        if let Err(e) = transport.deliver(&artifact.download).await {
            log_error_with_context!(&e, "Failed to deliver export artifact");
            return Err(e);
        }
        Ok(artifact.summary)
    }

    /// Builds the artifact for an export without delivering it
    ///
    /// # Errors
    ///
    /// Per-record and per-attachment problems never fail the build; they
    /// become error entries and warnings. Only request-level failures do.
    pub async fn build(
        &self,
        caller: &Contact,
        action: ExportAction,
        selection: &Selection,
    ) -> Result<ExportArtifact> {
        let started = Instant::now();
        let mut stage = ExportStage::Init;
        let mut summary = ExportSummary::new(action, selection.len());
        log_export_start!(action, caller.email, selection.len());

        if !self.oracle.is_manager(caller) {
            return Err(QuireError::Authorization(format!(
                "{} may not export papers",
                caller.email
            )));
        }
        let form = if action.includes_reviews() {
            Some(self.review_source()?.review_form().await?)
        } else {
            None
        };
        let enricher = self.enricher(form.as_ref())?;

        stage.advance();
        let fetched = self.records.fetch_papers(&selection.distinct_ids()).await?;
        let records = prepare_records(fetched, selection);
        summary.fetched = records.len();

        stage.advance();
        let collector = action.is_archive().then(|| {
            DocumentCollector::new(self.documents.clone(), self.settings.download_prefix.as_str())
                .with_timeout(self.settings.attachment_timeout)
                .with_hash_verification(self.settings.verify_hashes)
        });
        let ctx = RecordContext {
            caller,
            oracle: self.oracle.as_ref(),
            enricher: enricher.as_ref(),
            collector: collector.as_ref(),
        };
        let outcomes = process_records(&ctx, records, self.settings.max_concurrency).await;

        let mut staging = ArchiveStaging::new();
        if action.is_archive() {
            self.reserve_manifest_names(&mut staging, selection);
        }
        let results = merge_outcomes(outcomes, &mut staging, &mut summary)?;
        summary.documents_staged = staging.files().len();
        summary.warnings = staging.warning_count();

        stage.advance();
        let entries = reorder(results, selection);

        stage.advance();
        let prefix = &self.settings.download_prefix;
        let download = if let Some(form) = &form {
            stage.advance();
            self.emit_reviews(form, entries)?
        } else {
            let manifest_name = manifest_filename(prefix, &entries);
            let manifest = Manifest::from_entries(entries);
            tracing::debug!(filename = %manifest_name, entries = manifest.len(), "Manifest named");

            stage.advance();
            let body = render_json(&manifest)?;
            if action.is_archive() {
                emit_archive(prefix, manifest_name, body, staging)?
            } else {
                Download::json(manifest_name, body)
            }
        };

        stage.advance();
        summary.filename = download.filename.clone();
        summary.bytes = download.body.len();
        let summary = summary.with_duration(started.elapsed());
        log_export_complete!(download.filename, summary.entries(), summary.duration);
        summary.log_summary();

        Ok(ExportArtifact { download, summary })
    }

    fn enricher(&self, form: Option<&ReviewForm>) -> Result<Box<dyn RecordEnricher>> {
        match form {
            Some(form) => Ok(Box::new(ReviewEnricher::new(
                self.review_source()?.clone(),
                self.oracle.clone(),
                form.clone(),
            ))),
            None => Ok(Box::new(NoEnrichment)),
        }
    }

    fn review_source(&self) -> Result<&Arc<dyn ReviewSource>> {
        self.reviews.as_ref().ok_or_else(|| {
            QuireError::Configuration("review export requires a review source".to_string())
        })
    }

    /// Keeps attachments from taking any name the manifest or warnings
    /// file might use
    fn reserve_manifest_names(&self, staging: &mut ArchiveStaging, selection: &Selection) {
        let prefix = &self.settings.download_prefix;
        staging.reserve(format!("{prefix}data.json"));
        staging.reserve(WARNINGS_FILENAME);
        for pid in selection.distinct_ids() {
            staging.reserve(format!("{prefix}paper{pid}-data.json"));
        }
    }

    fn emit_reviews(&self, form: &ReviewForm, papers: Vec<ResultEntry>) -> Result<Download> {
        let manifest = RqcManifest::new(
            self.settings.commit.as_deref(),
            serialize_review_form(form)?,
            papers,
        );
        let filename = format!("{}rqc.json", self.settings.download_prefix);
        Ok(Download::json(filename, render_json(&manifest)?))
    }
}

/// Merges record outcomes in order: stages their documents, points each
/// document at its archive entry and records warnings
fn merge_outcomes(
    outcomes: Vec<RecordOutcome>,
    staging: &mut ArchiveStaging,
    summary: &mut ExportSummary,
) -> Result<HashMap<PaperId, ResultEntry>> {
    let mut results = HashMap::with_capacity(outcomes.len());
    for outcome in outcomes {
        let RecordOutcome {
            position,
            status,
            mut entry,
            documents,
            warnings,
        } = outcome;

        let rewrites: Vec<(String, String)> = documents
            .into_iter()
            .map(|doc| {
                let name = staging.stage(&doc.filename, doc.content, doc.compress);
                (doc.pointer, name)
            })
            .collect();
        if let Some(fields) = entry.fields_mut() {
            apply_rewrites(fields, &rewrites);
        }
        for warning in warnings {
            staging.warn(position, warning);
        }

        summary.record(status);
        let pid = entry.pid();
        if results.insert(pid, entry).is_some() {
            return Err(QuireError::Export(format!("paper {pid} processed twice")));
        }
    }
    Ok(results)
}

/// `<prefix>paper<id>-data.json` for a lone entry, `<prefix>data.json`
/// otherwise
fn manifest_filename(prefix: &str, entries: &[ResultEntry]) -> String {
    match entries {
        [only] => format!("{prefix}paper{}-data.json", only.pid()),
        _ => format!("{prefix}data.json"),
    }
}

fn emit_archive(
    prefix: &str,
    manifest_name: String,
    manifest: Vec<u8>,
    staging: ArchiveStaging,
) -> Result<Download> {
    let warnings = staging.warnings_text();
    let mut files = vec![StagedFile {
        name: manifest_name,
        content: manifest,
        compress: true,
    }];
    files.extend(staging.into_files());
    if let Some(text) = warnings {
        files.push(StagedFile {
            name: WARNINGS_FILENAME.to_string(),
            content: text.into_bytes(),
            compress: true,
        });
    }
    let body = build_archive(&files)?;
    Ok(Download::zip(format!("{prefix}data.zip"), body))
}
