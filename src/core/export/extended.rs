//! Review-inclusive export (`jsonrqc`)
//!
//! Papers are exported as usual and each authorized paper additionally
//! carries the submitted reviews the caller may see.

use super::pipeline::RecordEnricher;
use crate::adapters::traits::{AuthorizationOracle, ReviewSource};
use crate::core::serialize::serialize_review;
use crate::domain::{Contact, Paper, Result, ResultEntry, Review, ReviewForm};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Version reported in the manifest
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit baked in at build time, if the build provided one
pub const BUILD_COMMIT: Option<&str> = option_env!("QUIRE_GIT_COMMIT");

/// Adds a paper's visible reviews under `reviews`
pub struct ReviewEnricher {
    reviews: Arc<dyn ReviewSource>,
    oracle: Arc<dyn AuthorizationOracle>,
    form: ReviewForm,
}

impl ReviewEnricher {
    pub fn new(
        reviews: Arc<dyn ReviewSource>,
        oracle: Arc<dyn AuthorizationOracle>,
        form: ReviewForm,
    ) -> Self {
        Self {
            reviews,
            oracle,
            form,
        }
    }
}

#[async_trait]
impl RecordEnricher for ReviewEnricher {
    async fn enrich(
        &self,
        caller: &Contact,
        paper: &Paper,
        fields: &mut Map<String, Value>,
    ) -> Result<()> {
        let mut visible: Vec<Review> = self
            .reviews
            .fetch_reviews(paper.pid)
            .await?
            .into_iter()
            .filter(|r| r.submitted && self.oracle.can_view_review(caller, paper, r))
            .collect();
        visible.sort_by(Review::export_order);

        tracing::debug!(pid = %paper.pid, reviews = visible.len(), "Adding reviews");
        if !visible.is_empty() {
            let reviews: Vec<Value> = visible
                .iter()
                .map(|r| Value::Object(serialize_review(r, &self.form)))
                .collect();
            fields.insert("reviews".to_string(), Value::Array(reviews));
        }
        Ok(())
    }
}

/// Manifest of the review-inclusive export
#[derive(Debug, Clone, Serialize)]
pub struct RqcManifest {
    pub hotcrp_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotcrp_commit: Option<String>,

    /// Schema of the exported review form fields
    pub reviewform: Value,

    /// Entries in selection order; always an array
    pub papers: Vec<ResultEntry>,
}

impl RqcManifest {
    /// Builds the manifest; `commit` overrides the build commit
    pub fn new(commit: Option<&str>, reviewform: Value, papers: Vec<ResultEntry>) -> Self {
        Self {
            hotcrp_version: TOOL_VERSION.to_string(),
            hotcrp_commit: commit.or(BUILD_COMMIT).map(str::to_string),
            reviewform,
            papers,
        }
    }
}
