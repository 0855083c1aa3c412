//! Domain identifier types with validation
//!
//! Newtype wrappers for paper and review identifiers. Both are positive
//! integers; zero is rejected at construction and on deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Paper identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use quire::domain::ids::PaperId;
/// use std::str::FromStr;
///
/// let pid = PaperId::from_str("42").unwrap();
/// assert_eq!(pid.get(), 42);
/// assert!(PaperId::new(0).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub struct PaperId(u32);

impl PaperId {
    /// Creates a new PaperId
    ///
    /// # Returns
    ///
    /// Returns `Ok(PaperId)` if the id is positive and fits in 32 bits
    pub fn new(id: u64) -> Result<Self, String> {
        if id == 0 {
            return Err("Paper ID must be positive".to_string());
        }
        u32::try_from(id)
            .map(Self)
            .map_err(|_| format!("Paper ID out of range: {id}"))
    }

    /// Returns the numeric value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PaperId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: u64 = trimmed
            .parse()
            .map_err(|_| format!("Invalid paper ID: {trimmed:?}"))?;
        Self::new(value)
    }
}

impl TryFrom<u64> for PaperId {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PaperId> for u64 {
    fn from(id: PaperId) -> Self {
        u64::from(id.0)
    }
}

/// Review identifier newtype wrapper
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub struct ReviewId(u32);

impl ReviewId {
    /// Creates a new ReviewId
    pub fn new(id: u64) -> Result<Self, String> {
        if id == 0 {
            return Err("Review ID must be positive".to_string());
        }
        u32::try_from(id)
            .map(Self)
            .map_err(|_| format!("Review ID out of range: {id}"))
    }

    /// Returns the numeric value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for ReviewId {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReviewId> for u64 {
    fn from(id: ReviewId) -> Self {
        u64::from(id.0)
    }
}
