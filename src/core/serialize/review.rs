//! Review serialization for the review-inclusive export

use crate::domain::{Result, Review, ReviewField, ReviewForm};
use serde_json::{json, Map, Value};

/// Serializes a review
///
/// Only fields of `form` visible beyond reviewers are included, in form
/// order. Fields the review leaves empty are skipped.
pub fn serialize_review(review: &Review, form: &ReviewForm) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("rid".to_string(), json!(review.rid.get()));
    if let Some(ordinal) = review.ordinal_letters() {
        map.insert("ordinal".to_string(), json!(ordinal));
    }
    if let Some(name) = &review.reviewer_name {
        map.insert("reviewer_name".to_string(), json!(name));
    }
    map.insert("reviewer_email".to_string(), json!(review.reviewer_email));
    if let Some(at) = &review.submitted_at {
        map.insert("submitted_at".to_string(), json!(at.to_rfc3339()));
    }

    let mut fields = Map::new();
    for field in form.exported_fields() {
        if let Some(value) = review.fields.get(&field.id).filter(|v| !is_empty(v)) {
            fields.insert(field.id.clone(), value.clone());
        }
    }
    map.insert("fields".to_string(), Value::Object(fields));

    if !review.ratings.is_empty() {
        map.insert("ratings".to_string(), json!(review.ratings));
    }
    map
}

/// Schema of the exported review form fields
///
/// # Errors
///
/// Returns a serialization error if a field can't be represented as JSON.
pub fn serialize_review_form(form: &ReviewForm) -> Result<Value> {
    let fields: Vec<&ReviewField> = form.exported_fields().collect();
    Ok(serde_json::to_value(fields)?)
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
