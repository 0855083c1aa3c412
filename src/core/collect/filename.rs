//! Archive entry names for attachments

use crate::domain::{AttachmentRef, DocumentKind, PaperId};

/// File extension for a MIME type, without the dot
pub fn extension_for(mimetype: &str) -> Option<&'static str> {
    let essence = mimetype
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let ext = match essence.as_str() {
        "application/pdf" => "pdf",
        "text/plain" => "txt",
        "text/html" => "html",
        "application/json" => "json",
        "application/zip" => "zip",
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "text/csv" => "csv",
        "application/postscript" => "ps",
        _ => return None,
    };
    Some(ext)
}

/// Whether content of this MIME type is worth deflating
pub fn is_compressible(mimetype: &str) -> bool {
    matches!(extension_for(mimetype), Some("txt" | "html" | "json" | "csv" | "ps"))
}

/// Name of an attachment inside the archive
///
/// ```
/// use quire::core::collect::archive_filename;
/// use quire::domain::{AttachmentRef, DocumentKind, PaperId};
///
/// let doc = AttachmentRef::new("k", "application/pdf", 10);
/// let pid = PaperId::new(7).unwrap();
/// assert_eq!(archive_filename("conf-", pid, &DocumentKind::Final, &doc), "conf-final7.pdf");
/// ```
pub fn archive_filename(
    prefix: &str,
    pid: PaperId,
    kind: &DocumentKind,
    doc: &AttachmentRef,
) -> String {
    let ext = extension_for(&doc.mimetype)
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    match kind {
        DocumentKind::Submission => format!("{prefix}paper{pid}{ext}"),
        DocumentKind::Final => format!("{prefix}final{pid}{ext}"),
        DocumentKind::Option { slug, index: None } => format!("{prefix}paper{pid}-{slug}{ext}"),
        DocumentKind::Option {
            slug,
            index: Some(i),
        } => {
            let name = doc
                .filename
                .as_deref()
                .and_then(sanitize_original)
                .unwrap_or_else(|| format!("{}{ext}", i + 1));
            format!("{prefix}paper{pid}-{slug}/{name}")
        }
    }
}

/// Last path component of an uploaded filename, or `None` if nothing usable
/// remains
fn sanitize_original(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        None
    } else {
        Some(cleaned.to_string())
    }
}
