//! Artifact emission
//!
//! An artifact is a [`Download`]: the disposition filename, the content type
//! and the complete body. Bodies are always fully built in memory before a
//! transport sees them.

pub mod archive;
pub mod json;

pub use archive::build_archive;
pub use json::render_json;

/// Content type of plain JSON artifacts
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type of ZIP artifacts
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// A finished artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Download {
    pub fn json(filename: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: JSON_CONTENT_TYPE.to_string(),
            body,
        }
    }

    pub fn zip(filename: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: ZIP_CONTENT_TYPE.to_string(),
            body,
        }
    }

    /// `Content-Disposition` value: `attachment; filename="<name>"`
    pub fn content_disposition(&self) -> String {
        let mut escaped = String::with_capacity(self.filename.len());
        for c in self.filename.chars() {
            if matches!(c, '"' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        format!("attachment; filename=\"{escaped}\"")
    }

    /// Response headers for the artifact
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", self.content_type.clone()),
            ("Content-Disposition", self.content_disposition()),
            ("Content-Length", self.body.len().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition() {
        let download = Download::json("paper5-data.json", Vec::new());
        assert_eq!(
            download.content_disposition(),
            r#"attachment; filename="paper5-data.json""#
        );
    }

    #[test]
    fn test_content_disposition_escapes_quotes() {
        let download = Download::zip(r#"a"b\data.zip"#, Vec::new());
        assert_eq!(
            download.content_disposition(),
            r#"attachment; filename="a\"b\\data.zip""#
        );
    }

    #[test]
    fn test_headers() {
        let download = Download::zip("data.zip", vec![0; 12]);
        let headers = download.headers();
        assert_eq!(headers[0], ("Content-Type", "application/zip".to_string()));
        assert_eq!(headers[2], ("Content-Length", "12".to_string()));
    }
}
