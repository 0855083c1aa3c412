//! Manifest entries
//!
//! A [`ResultEntry`] is the per-record outcome of an export: either the
//! record's ordered field map or an error marker. A [`Manifest`] is what
//! gets serialized: one bare entry, or an ordered array.

use super::ids::PaperId;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Message used for records the caller may not administer
pub const PERMISSION_DENIED: &str = "You don't have permission to administer this paper.";

/// Message used when a record could not be serialized
pub const INTERNAL_ERROR: &str = "Internal error exporting this paper.";

/// Outcome of exporting one record
#[derive(Debug, Clone, PartialEq)]
pub enum ResultEntry {
    /// Exported fields; the map starts with `pid`
    Success { pid: PaperId, fields: Map<String, Value> },
    /// Record could not be exported
    Failure { pid: PaperId, error: String },
}

impl ResultEntry {
    /// Error entry for a record the caller may not administer
    pub fn denied(pid: PaperId) -> Self {
        ResultEntry::Failure {
            pid,
            error: PERMISSION_DENIED.to_string(),
        }
    }

    pub fn pid(&self) -> PaperId {
        match self {
            ResultEntry::Success { pid, .. } | ResultEntry::Failure { pid, .. } => *pid,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResultEntry::Success { .. })
    }

    /// Fields of a successful entry
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        match self {
            ResultEntry::Success { fields, .. } => Some(fields),
            ResultEntry::Failure { .. } => None,
        }
    }

    /// Mutable fields of a successful entry
    pub fn fields_mut(&mut self) -> Option<&mut Map<String, Value>> {
        match self {
            ResultEntry::Success { fields, .. } => Some(fields),
            ResultEntry::Failure { .. } => None,
        }
    }
}

impl Serialize for ResultEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResultEntry::Success { fields, .. } => fields.serialize(serializer),
            ResultEntry::Failure { pid, error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("pid", pid)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

/// The exported JSON payload
#[derive(Debug, Clone, PartialEq)]
pub enum Manifest {
    /// Exactly one entry remained; it is exported bare
    Single(ResultEntry),
    /// Any other count, in selection order
    Many(Vec<ResultEntry>),
}

impl Manifest {
    /// Builds the manifest from ordered entries: a lone entry is unwrapped
    pub fn from_entries(mut entries: Vec<ResultEntry>) -> Self {
        if entries.len() == 1 {
            if let Some(entry) = entries.pop() {
                return Manifest::Single(entry);
            }
        }
        Manifest::Many(entries)
    }

    /// Entries in manifest order
    pub fn entries(&self) -> &[ResultEntry] {
        match self {
            Manifest::Single(entry) => std::slice::from_ref(entry),
            Manifest::Many(entries) => entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Manifest::Single(entry) => entry.serialize(serializer),
            Manifest::Many(entries) => entries.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pid(n: u64) -> PaperId {
        PaperId::new(n).unwrap()
    }

    fn success(n: u64) -> ResultEntry {
        let mut fields = Map::new();
        fields.insert("pid".to_string(), json!(n));
        fields.insert("title".to_string(), json!(format!("Paper {n}")));
        ResultEntry::Success { pid: pid(n), fields }
    }

    #[test]
    fn test_denied_entry_shape() {
        let value = serde_json::to_value(ResultEntry::denied(pid(9))).unwrap();
        assert_eq!(
            value,
            json!({"pid": 9, "error": "You don't have permission to administer this paper."})
        );
    }

    #[test]
    fn test_success_entry_keeps_field_order() {
        let text = serde_json::to_string(&success(4)).unwrap();
        assert_eq!(text, r#"{"pid":4,"title":"Paper 4"}"#);
    }

    #[test]
    fn test_single_entry_manifest_is_bare() {
        let manifest = Manifest::from_entries(vec![success(3)]);
        assert!(matches!(manifest, Manifest::Single(_)));
        assert_eq!(
            serde_json::to_value(&manifest).unwrap(),
            json!({"pid": 3, "title": "Paper 3"})
        );
    }

    #[test]
    fn test_empty_and_multi_manifest_are_arrays() {
        let empty = Manifest::from_entries(Vec::new());
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!([]));
        assert!(empty.is_empty());

        let many = Manifest::from_entries(vec![success(5), ResultEntry::denied(pid(3))]);
        assert_eq!(many.len(), 2);
        let value = serde_json::to_value(&many).unwrap();
        assert_eq!(value[0]["pid"], json!(5));
        assert_eq!(value[1]["error"], json!(PERMISSION_DENIED));
    }
}
