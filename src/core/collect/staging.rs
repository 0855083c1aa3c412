//! Request-scoped archive staging
//!
//! Staging holds every file destined for the archive plus the warnings the
//! run produced. It is owned by the assembler and dropped after emission.

use std::collections::HashSet;

/// Name of the warnings file written into archives
pub const WARNINGS_FILENAME: &str = "README-warnings.txt";

/// A file waiting to be written into the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Entry name inside the archive
    pub name: String,

    pub content: Vec<u8>,

    /// Deflate the entry instead of storing it
    pub compress: bool,
}

#[derive(Debug, Clone)]
struct Warning {
    position: usize,
    message: String,
}

/// Staged archive files and warnings
#[derive(Debug, Default)]
pub struct ArchiveStaging {
    files: Vec<StagedFile>,
    taken: HashSet<String>,
    warnings: Vec<Warning>,
}

impl ArchiveStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a name as used without staging content under it
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    /// Stages content under `desired`, or under a suffixed variant if the
    /// name is taken. Returns the name actually used.
    pub fn stage(&mut self, desired: &str, content: Vec<u8>, compress: bool) -> String {
        let name = self.unique_name(desired);
        self.taken.insert(name.clone());
        self.files.push(StagedFile {
            name: name.clone(),
            content,
            compress,
        });
        name
    }

    /// Records a warning concerning the record at `position` in the selection
    pub fn warn(&mut self, position: usize, message: impl Into<String>) {
        self.warnings.push(Warning {
            position,
            message: message.into(),
        });
    }

    /// Warnings ordered by record position, then by insertion
    pub fn warnings(&self) -> Vec<&str> {
        let mut ordered: Vec<&Warning> = self.warnings.iter().collect();
        ordered.sort_by_key(|w| w.position);
        ordered.into_iter().map(|w| w.message.as_str()).collect()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Contents of the warnings file, if there is anything to report
    pub fn warnings_text(&self) -> Option<String> {
        if self.warnings.is_empty() {
            return None;
        }
        let mut text = self.warnings().join("\n");
        text.push('\n');
        Some(text)
    }

    /// Staged files in staging order
    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn into_files(self) -> Vec<StagedFile> {
        self.files
    }

    fn unique_name(&self, desired: &str) -> String {
        if !self.taken.contains(desired) {
            return desired.to_string();
        }
        let (stem, ext) = split_extension(desired);
        (2..)
            .map(|n| format!("{stem}-{n}{ext}"))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or_else(|| desired.to_string())
    }
}

/// Splits `dir/name.ext` into (`dir/name`, `.ext`); the extension is looked
/// for in the last path component only
fn split_extension(name: &str) -> (&str, &str) {
    let base_start = name.rfind('/').map_or(0, |i| i + 1);
    match name[base_start..].rfind('.') {
        Some(dot) if dot > 0 => name.split_at(base_start + dot),
        _ => (name, ""),
    }
}
