//! Review and review form models
//!
//! Used only by the extended (review-inclusive) export.

use super::ids::ReviewId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Who may see a review form field.
///
/// Variants are declared from most to least restricted; the derived ordering
/// follows that declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldVisibility {
    /// Hidden from everyone but the field's own reviewer
    Secret,
    /// Administrators only
    Admin,
    /// Reviewers only
    Reviewer,
    /// Program committee
    #[default]
    Pc,
    /// Authors, once decisions are out
    Audec,
    /// Authors
    Author,
}

impl FieldVisibility {
    /// Fields visible beyond reviewers are included in exports
    pub fn is_exported(self) -> bool {
        self > FieldVisibility::Reviewer
    }
}

/// Review form field kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Numeric score; `values` lists the labels for 1..=n
    Score { values: Vec<String> },
    /// Free text
    Text,
}

/// A field in the review form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewField {
    /// Stable field key
    pub id: String,

    /// Display name
    pub name: String,

    /// Field kind
    #[serde(flatten)]
    pub kind: FieldKind,

    /// Help text shown to reviewers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Field visibility
    #[serde(default)]
    pub visibility: FieldVisibility,

    /// Whether a value is required on submission
    #[serde(default)]
    pub required: bool,
}

/// The conference review form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReviewForm {
    /// Fields in display order
    #[serde(default)]
    pub fields: Vec<ReviewField>,
}

impl ReviewForm {
    /// Fields included in exports, in display order
    pub fn exported_fields(&self) -> impl Iterator<Item = &ReviewField> {
        self.fields.iter().filter(|f| f.visibility.is_exported())
    }
}

/// A review of a paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Review id
    pub rid: ReviewId,

    /// Reviewer email
    pub reviewer_email: String,

    /// Reviewer display name
    #[serde(default)]
    pub reviewer_name: Option<String>,

    /// Ordinal assigned on submission (1 = "A")
    #[serde(default)]
    pub ordinal: Option<u32>,

    /// Whether the review has been submitted
    #[serde(default)]
    pub submitted: bool,

    /// Submission time
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,

    /// Field values keyed by review form field id
    #[serde(default)]
    pub fields: Map<String, Value>,

    /// Ratings given to this review
    #[serde(default)]
    pub ratings: Vec<String>,
}

impl Review {
    /// Total order used when exporting a paper's reviews: ordinal first
    /// (unordinaled reviews last), then submission time, then review id.
    pub fn export_order(a: &Review, b: &Review) -> Ordering {
        let by_ordinal = match (a.ordinal, b.ordinal) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_ordinal
            .then_with(|| match (a.submitted_at, b.submitted_at) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| a.rid.cmp(&b.rid))
    }

    /// Letter form of the ordinal: 1 → "A", 26 → "Z", 27 → "AA"
    pub fn ordinal_letters(&self) -> Option<String> {
        self.ordinal.filter(|n| *n > 0).map(unparse_ordinal)
    }
}

fn unparse_ordinal(mut n: u32) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn review(rid: u64, ordinal: Option<u32>, day: Option<u32>) -> Review {
        Review {
            rid: ReviewId::new(rid).unwrap(),
            reviewer_email: format!("r{rid}@example.org"),
            reviewer_name: None,
            ordinal,
            submitted: true,
            submitted_at: day.map(|d| Utc.with_ymd_and_hms(2026, 3, d, 12, 0, 0).unwrap()),
            fields: Map::new(),
            ratings: Vec::new(),
        }
    }

    #[test]
    fn test_visibility_export_threshold() {
        assert!(!FieldVisibility::Secret.is_exported());
        assert!(!FieldVisibility::Admin.is_exported());
        assert!(!FieldVisibility::Reviewer.is_exported());
        assert!(FieldVisibility::Pc.is_exported());
        assert!(FieldVisibility::Author.is_exported());
    }

    #[test]
    fn test_export_order() {
        let mut reviews = vec![
            review(4, None, Some(1)),
            review(3, Some(2), Some(5)),
            review(2, Some(1), Some(9)),
            review(1, None, Some(1)),
            review(5, None, None),
        ];
        reviews.sort_by(Review::export_order);
        let rids: Vec<u32> = reviews.iter().map(|r| r.rid.get()).collect();
        assert_eq!(rids, vec![2, 3, 1, 4, 5]);
    }

    #[test]
    fn test_ordinal_letters() {
        assert_eq!(review(1, Some(1), None).ordinal_letters().as_deref(), Some("A"));
        assert_eq!(review(1, Some(26), None).ordinal_letters().as_deref(), Some("Z"));
        assert_eq!(review(1, Some(27), None).ordinal_letters().as_deref(), Some("AA"));
        assert_eq!(review(1, Some(0), None).ordinal_letters(), None);
        assert_eq!(review(1, None, None).ordinal_letters(), None);
    }

    #[test]
    fn test_review_field_deserialize() {
        let field: ReviewField = serde_json::from_value(serde_json::json!({
            "id": "overall",
            "name": "Overall merit",
            "type": "score",
            "values": ["Reject", "Accept"],
            "visibility": "author"
        }))
        .unwrap();
        assert_eq!(
            field.kind,
            FieldKind::Score {
                values: vec!["Reject".to_string(), "Accept".to_string()]
            }
        );
        assert_eq!(field.visibility, FieldVisibility::Author);
    }
}
