//! Paper serialization
//!
//! Turns a [`Paper`] into an ordered field map and, when document
//! collection is on, the list of attachments the archive needs.

use crate::domain::{
    Author, AttachmentRef, DocumentKind, OptionValue, Paper, PaperId, QuireError, Result,
};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Request to collect one attachment into the archive
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentRequest {
    /// JSON pointer of the document object inside the record's fields
    pub pointer: String,

    /// Where the attachment sits in the paper
    pub kind: DocumentKind,

    /// The attachment itself
    pub attachment: AttachmentRef,
}

/// Output of [`serialize_paper`]
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedRecord {
    pub pid: PaperId,

    /// Ordered fields, starting with `pid`
    pub fields: Map<String, Value>,

    /// Attachments to collect, in field order; empty unless requested
    pub attachments: Vec<AttachmentRequest>,
}

/// Serializes a paper
///
/// Fields are emitted as `pid, title, status, authors, abstract, topics,
/// submission, final, options`; absent values are omitted. Options are
/// keyed by slug in option id order.
///
/// # Errors
///
/// Returns a serialization error if an option slug is empty, malformed or
/// used twice.
pub fn serialize_paper(paper: &Paper, collect_documents: bool) -> Result<SerializedRecord> {
    let mut fields = Map::new();
    let mut attachments = Vec::new();
    let mut request = |pointer: String, kind: DocumentKind, doc: &AttachmentRef| {
        if collect_documents {
            attachments.push(AttachmentRequest {
                pointer,
                kind,
                attachment: doc.clone(),
            });
        }
    };

    fields.insert("pid".to_string(), json!(paper.pid.get()));
    fields.insert("title".to_string(), json!(paper.title));
    fields.insert("status".to_string(), json!(paper.status.as_str()));

    if !paper.authors.is_empty() {
        let authors: Vec<Value> = paper.authors.iter().map(author_json).collect();
        fields.insert("authors".to_string(), Value::Array(authors));
    }
    if let Some(text) = &paper.abstract_text {
        fields.insert("abstract".to_string(), json!(text));
    }
    if !paper.topics.is_empty() {
        fields.insert("topics".to_string(), json!(paper.topics));
    }
    if let Some(doc) = &paper.submission {
        fields.insert("submission".to_string(), document_json(doc));
        request("/submission".to_string(), DocumentKind::Submission, doc);
    }
    if let Some(doc) = &paper.final_version {
        fields.insert("final".to_string(), document_json(doc));
        request("/final".to_string(), DocumentKind::Final, doc);
    }

    let mut options: Vec<_> = paper.options.iter().collect();
    options.sort_by_key(|o| o.id);

    let mut seen = HashSet::new();
    let mut option_fields = Map::new();
    for option in options {
        validate_slug(paper.pid, &option.slug)?;
        if !seen.insert(option.slug.as_str()) {
            return Err(QuireError::Serialization(format!(
                "paper {}: duplicate option slug {:?}",
                paper.pid, option.slug
            )));
        }

        let base = format!("/options/{}", escape_pointer(&option.slug));
        let value = match &option.value {
            OptionValue::Checkbox(b) => json!(b),
            OptionValue::Text(s) | OptionValue::Selector(s) => json!(s),
            OptionValue::Numeric(n) => json!(n),
            OptionValue::Document(doc) => {
                request(
                    base.clone(),
                    DocumentKind::Option {
                        slug: option.slug.clone(),
                        index: None,
                    },
                    doc,
                );
                document_json(doc)
            }
            OptionValue::Attachments(docs) => {
                for (index, doc) in docs.iter().enumerate() {
                    request(
                        format!("{base}/{index}"),
                        DocumentKind::Option {
                            slug: option.slug.clone(),
                            index: Some(index),
                        },
                        doc,
                    );
                }
                Value::Array(docs.iter().map(document_json).collect())
            }
        };
        option_fields.insert(option.slug.clone(), value);
    }
    if !option_fields.is_empty() {
        fields.insert("options".to_string(), Value::Object(option_fields));
    }

    Ok(SerializedRecord {
        pid: paper.pid,
        fields,
        attachments,
    })
}

/// Document object as exported: never includes the storage key
pub fn document_json(doc: &AttachmentRef) -> Value {
    let mut map = Map::new();
    map.insert("mimetype".to_string(), json!(doc.mimetype));
    map.insert("size".to_string(), json!(doc.size));
    if let Some(hash) = &doc.hash {
        map.insert("hash".to_string(), json!(hash));
    }
    if let Some(filename) = &doc.filename {
        map.insert("filename".to_string(), json!(filename));
    }
    if let Some(ts) = &doc.timestamp {
        map.insert("timestamp".to_string(), json!(ts.to_rfc3339()));
    }
    Value::Object(map)
}

fn author_json(author: &Author) -> Value {
    let mut map = Map::new();
    for (key, value) in [
        ("first", &author.first),
        ("last", &author.last),
        ("email", &author.email),
        ("affiliation", &author.affiliation),
    ] {
        if let Some(v) = value {
            map.insert(key.to_string(), json!(v));
        }
    }
    Value::Object(map)
}

/// Slugs end up in archive entry names
fn validate_slug(pid: PaperId, slug: &str) -> Result<()> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(QuireError::Serialization(format!(
            "paper {pid}: invalid option slug {slug:?}"
        )))
    }
}

/// Escapes a JSON pointer reference token (RFC 6901)
pub fn escape_pointer(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaperOption, PaperStatus};

    fn pid(n: u64) -> PaperId {
        PaperId::new(n).unwrap()
    }

    fn pdf(key: &str) -> AttachmentRef {
        AttachmentRef::new(key, "application/pdf", 1024).with_hash("sha2-00ff")
    }

    fn option(id: u32, slug: &str, value: OptionValue) -> PaperOption {
        PaperOption {
            id,
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            value,
        }
    }

    fn full_paper() -> Paper {
        Paper::builder(pid(5))
            .title("Ordering Things")
            .status(PaperStatus::Accepted)
            .abstract_text("We order things.")
            .author(Author {
                first: Some("Ada".to_string()),
                last: Some("Byron".to_string()),
                ..Default::default()
            })
            .topic("Systems")
            .submission(pdf("sub5"))
            .final_version(pdf("fin5"))
            .option(option(
                9,
                "slides",
                OptionValue::Attachments(vec![pdf("s1"), pdf("s2").with_filename("talk.pdf")]),
            ))
            .option(option(2, "artifact", OptionValue::Checkbox(true)))
            .build()
    }

    #[test]
    fn test_field_order() {
        let record = serialize_paper(&full_paper(), false).unwrap();
        let keys: Vec<&str> = record.fields.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "pid", "title", "status", "authors", "abstract", "topics", "submission", "final",
                "options"
            ]
        );
        let option_keys: Vec<&str> = record.fields["options"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(option_keys, vec!["artifact", "slides"]);
        assert!(record.attachments.is_empty());
    }

    #[test]
    fn test_absent_fields_omitted() {
        let paper = Paper::builder(pid(3)).title("Bare").build();
        let record = serialize_paper(&paper, true).unwrap();
        assert_eq!(
            Value::Object(record.fields),
            json!({"pid": 3, "title": "Bare", "status": "submitted"})
        );
        assert!(record.attachments.is_empty());
    }

    #[test]
    fn test_document_fields_hide_storage_key() {
        let record = serialize_paper(&full_paper(), false).unwrap();
        assert_eq!(
            record.fields["submission"],
            json!({"mimetype": "application/pdf", "size": 1024, "hash": "sha2-00ff"})
        );
        assert!(!record.fields["submission"]
            .as_object()
            .unwrap()
            .contains_key("storage_key"));
    }

    #[test]
    fn test_attachment_requests_point_into_fields() {
        let record = serialize_paper(&full_paper(), true).unwrap();
        let pointers: Vec<&str> = record
            .attachments
            .iter()
            .map(|r| r.pointer.as_str())
            .collect();
        assert_eq!(
            pointers,
            vec!["/submission", "/final", "/options/slides/0", "/options/slides/1"]
        );

        let value = Value::Object(record.fields.clone());
        for request in &record.attachments {
            assert!(value.pointer(&request.pointer).is_some(), "{}", request.pointer);
        }
        assert_eq!(
            record.attachments[3].kind,
            DocumentKind::Option {
                slug: "slides".to_string(),
                index: Some(1)
            }
        );
    }

    #[test]
    fn test_duplicate_slug_is_an_error() {
        let paper = Paper::builder(pid(1))
            .option(option(1, "x", OptionValue::Numeric(1)))
            .option(option(2, "x", OptionValue::Numeric(2)))
            .build();
        assert!(matches!(
            serialize_paper(&paper, false),
            Err(QuireError::Serialization(_))
        ));
    }

    #[test]
    fn test_invalid_slug_is_an_error() {
        let paper = Paper::builder(pid(1))
            .option(option(1, "../up", OptionValue::Numeric(1)))
            .build();
        assert!(serialize_paper(&paper, false).is_err());
    }

    #[test]
    fn test_escape_pointer() {
        assert_eq!(escape_pointer("a/b~c"), "a~1b~0c");
    }
}
