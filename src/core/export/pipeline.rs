//! Per-record processing
//!
//! Each record is authorized, serialized, enriched and (in archive mode)
//! has its attachments loaded. Records run concurrently, but every worker
//! returns an isolated [`RecordOutcome`]; nothing shared is mutated until
//! the assembler merges the outcomes in order.

use crate::adapters::traits::AuthorizationOracle;
use crate::core::collect::{DocumentCollector, LoadedDocument};
use crate::core::serialize::{serialize_paper, SerializedRecord};
use crate::domain::{
    CatalogError, Contact, DocumentKind, Paper, PaperId, QuireError, Result, ResultEntry,
    Selection, INTERNAL_ERROR, PERMISSION_DENIED,
};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// How a record fared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Exported,
    Denied,
    Failed,
}

/// Result of processing one record
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    /// Position of the record's first occurrence in the selection
    pub position: usize,

    pub status: OutcomeStatus,

    pub entry: ResultEntry,

    /// Attachments loaded for the archive
    pub documents: Vec<LoadedDocument>,

    /// Warnings, already formatted as `#<id>: <reason>`
    pub warnings: Vec<String>,
}

impl RecordOutcome {
    fn new(position: usize, status: OutcomeStatus, entry: ResultEntry) -> Self {
        Self {
            position,
            status,
            entry,
            documents: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn pid(&self) -> PaperId {
        self.entry.pid()
    }
}

/// Adds data to a serialized record
#[async_trait]
pub trait RecordEnricher: Send + Sync {
    async fn enrich(
        &self,
        caller: &Contact,
        paper: &Paper,
        fields: &mut Map<String, Value>,
    ) -> Result<()>;
}

/// Enricher that adds nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

#[async_trait]
impl RecordEnricher for NoEnrichment {
    async fn enrich(
        &self,
        _caller: &Contact,
        _paper: &Paper,
        _fields: &mut Map<String, Value>,
    ) -> Result<()> {
        Ok(())
    }
}

/// Everything a worker needs to process a record
pub struct RecordContext<'a> {
    pub caller: &'a Contact,
    pub oracle: &'a dyn AuthorizationOracle,
    pub enricher: &'a dyn RecordEnricher,
    /// Set in archive mode only
    pub collector: Option<&'a DocumentCollector>,
}

impl RecordContext<'_> {
    fn archive_mode(&self) -> bool {
        self.collector.is_some()
    }
}

/// Keeps the first fetched instance of each selected paper and sorts the
/// survivors by selection position
pub fn prepare_records(fetched: Vec<Paper>, selection: &Selection) -> Vec<(usize, Paper)> {
    let positions = selection.first_positions();
    let mut seen = HashSet::new();
    let mut records: Vec<(usize, Paper)> = Vec::with_capacity(fetched.len());

    for paper in fetched {
        let Some(&position) = positions.get(&paper.pid) else {
            tracing::debug!(pid = %paper.pid, "Ignoring unselected paper from record source");
            continue;
        };
        if !seen.insert(paper.pid) {
            tracing::debug!(pid = %paper.pid, "Ignoring duplicate paper from record source");
            continue;
        }
        records.push((position, paper));
    }

    records.sort_by_key(|(position, _)| *position);
    records
}

/// Processes one record
pub async fn process_record(ctx: &RecordContext<'_>, position: usize, paper: Paper) -> RecordOutcome {
    let pid = paper.pid;

    if !ctx.oracle.can_administer(ctx.caller, &paper) {
        tracing::debug!(pid = %pid, "Permission denied");
        let mut outcome = RecordOutcome::new(position, OutcomeStatus::Denied, ResultEntry::denied(pid));
        if ctx.archive_mode() {
            outcome.warnings.push(format!("#{pid}: {PERMISSION_DENIED}"));
        }
        return outcome;
    }

    let record = match serialize_and_enrich(ctx, &paper).await {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(pid = %pid, error = %e, "Failed to serialize paper");
            return RecordOutcome::new(
                position,
                OutcomeStatus::Failed,
                ResultEntry::Failure {
                    pid,
                    error: INTERNAL_ERROR.to_string(),
                },
            );
        }
    };

    let mut outcome = RecordOutcome::new(
        position,
        OutcomeStatus::Exported,
        ResultEntry::Success {
            pid,
            fields: record.fields,
        },
    );

    if let Some(collector) = ctx.collector {
        for request in &record.attachments {
            match collector.collect(pid, request).await {
                Ok(doc) => outcome.documents.push(doc),
                Err(e) => {
                    tracing::warn!(
                        pid = %pid,
                        document = %request.kind.label(),
                        error = %e,
                        "Attachment not collected"
                    );
                    outcome
                        .warnings
                        .push(format!("#{pid}: {}", attachment_failure(&request.kind, &e)));
                }
            }
        }
    }

    outcome
}

/// Reader-facing reason an attachment is missing from the archive
///
/// Storage keys and error prefixes stay in the log.
fn attachment_failure(kind: &DocumentKind, error: &QuireError) -> String {
    let label = kind.label();
    match error {
        QuireError::Catalog(CatalogError::Timeout(secs)) => {
            format!("{label} timed out after {secs}s")
        }
        QuireError::Export(_) => format!("{label} does not match its recorded hash"),
        _ => format!("{label} could not be loaded"),
    }
}

async fn serialize_and_enrich(
    ctx: &RecordContext<'_>,
    paper: &Paper,
) -> Result<SerializedRecord> {
    let mut record = serialize_paper(paper, ctx.archive_mode())?;
    ctx.enricher
        .enrich(ctx.caller, paper, &mut record.fields)
        .await?;
    Ok(record)
}

/// Processes records with at most `max_concurrency` in flight
///
/// Outcomes come back in input order regardless of completion order.
pub async fn process_records(
    ctx: &RecordContext<'_>,
    records: Vec<(usize, Paper)>,
    max_concurrency: usize,
) -> Vec<RecordOutcome> {
    stream::iter(records)
        .map(|(position, paper)| process_record(ctx, position, paper))
        .buffered(max_concurrency.max(1))
        .collect()
        .await
}
