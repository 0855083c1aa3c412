//! Attachment collection and archive staging

pub mod collector;
pub mod filename;
pub mod staging;

pub use collector::{apply_rewrites, DocumentCollector, LoadedDocument};
pub use filename::{archive_filename, extension_for, is_compressible};
pub use staging::{ArchiveStaging, StagedFile, WARNINGS_FILENAME};
