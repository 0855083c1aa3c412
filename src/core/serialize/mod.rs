//! Record serialization
//!
//! Serialization is pure: it never loads attachment content. Documents that
//! belong in an archive are returned as [`AttachmentRequest`]s and resolved
//! by the collector.

pub mod paper;
pub mod review;

pub use paper::{document_json, serialize_paper, AttachmentRequest, SerializedRecord};
pub use review::{serialize_review, serialize_review_form};
