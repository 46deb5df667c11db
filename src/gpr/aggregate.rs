//! Replicate pairing and aggregated records
//!
//! Every biological identifier is printed twice on a dual-channel slide.
//! Both averaging and crop extraction only work on identifiers that occur
//! exactly twice; `require_pair` is the single place that rule is checked.

use std::fmt;

use crate::gpr::record::{AggregatedRecord, Statistic};
use crate::gpr::spot_set::{sort_by_identifier, sort_by_statistic_descending};

/// An identifier that does not occur exactly twice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairViolation {
    pub identifier: String,
    pub count: usize,
}

impl fmt::Display for PairViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identifier '{}' occurs {} times, expected exactly 2",
               self.identifier, self.count)
    }
}

/// Returns the two members of a replicate group
///
/// # Arguments
/// * `identifier` - Identifier the group belongs to, for reporting
/// * `group` - All occurrences of the identifier
///
/// # Returns
/// The first and second occurrence, or a `PairViolation` describing the
/// actual number of occurrences
pub fn require_pair<T: Copy>(identifier: &str, group: &[T]) -> Result<(T, T), PairViolation> {
    match group {
        [first, second] => Ok((*first, *second)),
        _ => Err(PairViolation {
            identifier: identifier.to_string(),
            count: group.len(),
        }),
    }
}

/// Per-identifier averages, independent of the records they came from
#[derive(Debug, Clone, Default)]
pub struct AggregateSet {
    records: Vec<AggregatedRecord>,
}

impl AggregateSet {
    pub fn new(records: Vec<AggregatedRecord>) -> Self {
        AggregateSet { records }
    }

    pub fn records(&self) -> &[AggregatedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up the aggregate for one identifier
    pub fn get(&self, identifier: &str) -> Option<&AggregatedRecord> {
        self.records.iter().find(|r| r.identifier == identifier)
    }

    /// Sorts ascending by identifier
    pub fn sort_by_identifier(&mut self) -> &mut Self {
        sort_by_identifier(&mut self.records);
        self
    }

    /// Sorts descending by one statistic
    pub fn sort_by_statistic_descending(&mut self, statistic: Statistic) -> &mut Self {
        sort_by_statistic_descending(&mut self.records, statistic);
        self
    }
}
