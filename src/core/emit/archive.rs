//! ZIP archive framing
//!
//! Entries carry a fixed timestamp and fixed permissions so the same staged
//! files always produce the same bytes.

use crate::core::collect::StagedFile;
use crate::domain::Result;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Writes `files` into a ZIP archive, in order
///
/// # Errors
///
/// Returns an archive error if two entries share a name or framing fails.
pub fn build_archive(files: &[StagedFile]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let base = SimpleFileOptions::default()
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    for file in files {
        let method = if file.compress {
            CompressionMethod::Deflated
        } else {
            CompressionMethod::Stored
        };
        writer.start_file(file.name.as_str(), base.compression_method(method))?;
        writer.write_all(&file.content)?;
    }

    let cursor = writer.finish()?;
    let body = cursor.into_inner();
    tracing::debug!(entries = files.len(), bytes = body.len(), "Archive built");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn staged(name: &str, content: &[u8], compress: bool) -> StagedFile {
        StagedFile {
            name: name.to_string(),
            content: content.to_vec(),
            compress,
        }
    }

    fn sample() -> Vec<StagedFile> {
        vec![
            staged("data.json", b"[]\n", true),
            staged("paper1.pdf", b"%PDF-1.4 binary", false),
            staged("paper1-slides/talk.pdf", b"%PDF-1.7", false),
        ]
    }

    #[test]
    fn test_archive_contents() {
        let body = build_archive(&sample()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(body)).unwrap();
        assert_eq!(archive.len(), 3);

        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["data.json", "paper1.pdf", "paper1-slides/talk.pdf"]);

        let mut manifest = String::new();
        let mut entry = archive.by_name("data.json").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        entry.read_to_string(&mut manifest).unwrap();
        assert_eq!(manifest, "[]\n");
        drop(entry);

        let pdf = archive.by_name("paper1.pdf").unwrap();
        assert_eq!(pdf.compression(), CompressionMethod::Stored);
    }

    #[test]
    fn test_archive_is_deterministic() {
        assert_eq!(build_archive(&sample()).unwrap(), build_archive(&sample()).unwrap());
    }

    #[test]
    fn test_duplicate_entry_fails() {
        let files = vec![staged("a.txt", b"1", true), staged("a.txt", b"2", true)];
        assert!(build_archive(&files).is_err());
    }
}
