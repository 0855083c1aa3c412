//! Caller-supplied paper selection
//!
//! A selection is an ordered list of paper ids. Order is significant and
//! duplicates are allowed; only the first occurrence of an id counts.

use super::errors::QuireError;
use super::ids::PaperId;
use super::result::Result;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Largest range a single `a-b` token may expand to
const MAX_RANGE_LEN: u64 = 100_000;

/// Most ids a whole selection may hold, duplicates and expanded ranges
/// included
const MAX_SELECTION_LEN: usize = 100_000;

/// Ordered selection of paper ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<PaperId>,
}

impl Selection {
    /// Creates a selection from ids in caller order
    ///
    /// # Errors
    ///
    /// Returns a validation error if `ids` is empty
    pub fn new(ids: Vec<PaperId>) -> Result<Self> {
        if ids.is_empty() {
            return Err(QuireError::Validation(
                "Selection must contain at least one paper".to_string(),
            ));
        }
        Ok(Self { ids })
    }

    /// Parses a selection such as `"5, 3 5"` or `"1-4,9"`
    ///
    /// # Examples
    ///
    /// ```
    /// use quire::domain::Selection;
    ///
    /// let sel = Selection::parse("5,3-4 5").unwrap();
    /// let ids: Vec<u32> = sel.ids().iter().map(|p| p.get()).collect();
    /// assert_eq!(ids, vec![5, 3, 4, 5]);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let mut ids = Vec::new();
        for token in input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            match token.split_once('-') {
                Some((lo, hi)) if !lo.is_empty() => {
                    let lo = PaperId::from_str(lo).map_err(QuireError::Validation)?;
                    let hi = PaperId::from_str(hi).map_err(QuireError::Validation)?;
                    if hi < lo {
                        return Err(QuireError::Validation(format!(
                            "Invalid paper range {token:?}"
                        )));
                    }
                    if u64::from(hi.get() - lo.get()) >= MAX_RANGE_LEN {
                        return Err(QuireError::Validation(format!(
                            "Paper range {token:?} is too large"
                        )));
                    }
                    ensure_capacity(ids.len(), (hi.get() - lo.get()) as usize + 1)?;
                    for n in lo.get()..=hi.get() {
                        ids.push(PaperId::new(u64::from(n)).map_err(QuireError::Validation)?);
                    }
                }
                _ => {
                    ensure_capacity(ids.len(), 1)?;
                    ids.push(PaperId::from_str(token).map_err(QuireError::Validation)?);
                }
            }
        }
        Self::new(ids)
    }

    /// Ids in caller order, duplicates included
    pub fn ids(&self) -> &[PaperId] {
        &self.ids
    }

    /// Number of ids, duplicates included
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in first-occurrence order with duplicates removed
    pub fn distinct_ids(&self) -> Vec<PaperId> {
        let positions = self.first_positions();
        self.ids
            .iter()
            .enumerate()
            .filter(|(i, pid)| positions.get(pid) == Some(i))
            .map(|(_, pid)| *pid)
            .collect()
    }

    /// Map from id to the index of its first occurrence
    pub fn first_positions(&self) -> HashMap<PaperId, usize> {
        let mut positions = HashMap::with_capacity(self.ids.len());
        for (i, pid) in self.ids.iter().enumerate() {
            positions.entry(*pid).or_insert(i);
        }
        positions
    }

    /// Index of the first occurrence of `pid`
    pub fn position(&self, pid: PaperId) -> Option<usize> {
        self.ids.iter().position(|p| *p == pid)
    }

    pub fn contains(&self, pid: PaperId) -> bool {
        self.ids.contains(&pid)
    }
}

fn ensure_capacity(current: usize, adding: usize) -> Result<()> {
    if current + adding > MAX_SELECTION_LEN {
        return Err(QuireError::Validation(format!(
            "Selection is too large (more than {MAX_SELECTION_LEN} papers)"
        )));
    }
    Ok(())
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ids.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl FromStr for Selection {
    type Err = QuireError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
