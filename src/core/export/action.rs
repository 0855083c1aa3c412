//! Export actions

use crate::domain::{QuireError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A named export action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportAction {
    /// Plain JSON manifest
    Json,
    /// ZIP archive with the manifest and every attachment
    JsonAttach,
    /// Manifest with review data for reviewqualitycollector.org
    JsonRqc,
}

impl ExportAction {
    /// All actions, in menu order
    pub const ALL: [ExportAction; 3] = [
        ExportAction::Json,
        ExportAction::JsonAttach,
        ExportAction::JsonRqc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExportAction::Json => "json",
            ExportAction::JsonAttach => "jsonattach",
            ExportAction::JsonRqc => "jsonrqc",
        }
    }

    /// Menu label
    pub fn description(self) -> &'static str {
        match self {
            ExportAction::Json => "JSON",
            ExportAction::JsonAttach => "JSON with attachments",
            ExportAction::JsonRqc => "JSON for reviewqualitycollector.org",
        }
    }

    /// Whether attachments are collected into a ZIP archive
    pub fn is_archive(self) -> bool {
        self == ExportAction::JsonAttach
    }

    /// Whether review data is included
    pub fn includes_reviews(self) -> bool {
        self == ExportAction::JsonRqc
    }
}

impl fmt::Display for ExportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportAction {
    type Err = QuireError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                QuireError::Validation(format!(
                    "Unknown export action '{}'. Must be one of: {}",
                    s,
                    Self::ALL.map(ExportAction::name).join(", ")
                ))
            })
    }
}
