//! Selection ordering
//!
//! Results are accumulated in a map keyed by paper id, then projected into
//! the order the caller selected them in.

use crate::domain::{PaperId, ResultEntry, Selection};
use std::collections::HashMap;

/// Reorders results into selection order
///
/// The output follows the first occurrence of each id in `selection`. Ids
/// with no result are dropped and no id appears twice.
pub fn reorder(
    mut results: HashMap<PaperId, ResultEntry>,
    selection: &Selection,
) -> Vec<ResultEntry> {
    let ordered: Vec<ResultEntry> = selection
        .ids()
        .iter()
        .filter_map(|pid| results.remove(pid))
        .collect();
    if !results.is_empty() {
        tracing::debug!(
            unselected = results.len(),
            "Dropping results for papers outside the selection"
        );
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn pid(n: u64) -> PaperId {
        PaperId::new(n).unwrap()
    }

    fn entry(n: u64) -> ResultEntry {
        let mut fields = Map::new();
        fields.insert("pid".to_string(), json!(n));
        ResultEntry::Success { pid: pid(n), fields }
    }

    fn results(ids: &[u64]) -> HashMap<PaperId, ResultEntry> {
        ids.iter().map(|n| (pid(*n), entry(*n))).collect()
    }

    fn pids(entries: &[ResultEntry]) -> Vec<u32> {
        entries.iter().map(|e| e.pid().get()).collect()
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let selection = Selection::parse("5,3,5").unwrap();
        assert_eq!(pids(&reorder(results(&[3, 5]), &selection)), vec![5, 3]);
    }

    #[test]
    fn test_missing_ids_dropped() {
        let selection = Selection::parse("7").unwrap();
        assert!(reorder(HashMap::new(), &selection).is_empty());

        let selection = Selection::parse("1 2 3 4").unwrap();
        assert_eq!(pids(&reorder(results(&[4, 2]), &selection)), vec![2, 4]);
    }

    #[test]
    fn test_unselected_results_dropped() {
        let selection = Selection::parse("2").unwrap();
        assert_eq!(pids(&reorder(results(&[1, 2, 3]), &selection)), vec![2]);
    }
}
