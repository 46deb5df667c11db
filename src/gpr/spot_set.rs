//! Parsed spot collection and its orderings
//!
//! Sorting permutes the owned collection in place and hands back the same
//! set, so callers that need two orderings must read the first one before
//! asking for the second.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::gpr::aggregate::{require_pair, AggregateSet};
use crate::gpr::record::{AggregatedRecord, SpotGeometry, SpotRecord, SpotStatistics, Statistic};
use log::debug;

/// Number of rows dropped during parsing, by reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    /// Rows with the wrong number of fields
    pub structural: usize,
    /// Calibration/control rows
    pub reserved: usize,
    /// Empty or blank spots
    pub blank: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.structural + self.reserved + self.blank
    }
}

/// Spot records of one GPR file, in file order until sorted
#[derive(Debug, Clone)]
pub struct SpotSet {
    source: String,
    records: Vec<SpotRecord>,
    skipped: SkipCounts,
}

impl SpotSet {
    pub fn new(source: &str, records: Vec<SpotRecord>, skipped: SkipCounts) -> Self {
        SpotSet {
            source: source.to_string(),
            records,
            skipped,
        }
    }

    /// Builds a set from records that did not come from a file
    pub fn from_records(records: Vec<SpotRecord>) -> Self {
        SpotSet::new("<memory>", records, SkipCounts::default())
    }

    /// Name of the file the records were parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[SpotRecord] {
        &self.records
    }

    pub fn skipped(&self) -> SkipCounts {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct identifiers in first-seen order
    pub fn identifiers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut identifiers = Vec::new();

        for record in &self.records {
            if seen.insert(record.identifier.as_str()) {
                identifiers.push(record.identifier.as_str());
            }
        }

        identifiers
    }

    /// Groups records by identifier, preserving the current record order
    /// within each group
    pub fn group_by_identifier(&self) -> HashMap<&str, Vec<&SpotRecord>> {
        let mut groups: HashMap<&str, Vec<&SpotRecord>> = HashMap::new();

        for record in &self.records {
            groups.entry(record.identifier.as_str())
                .or_insert_with(|| Vec::with_capacity(2))
                .push(record);
        }

        groups
    }

    /// Identifier to spot geometry, in the current record order
    pub fn geometry_by_identifier(&self) -> HashMap<String, Vec<SpotGeometry>> {
        let mut geometry: HashMap<String, Vec<SpotGeometry>> = HashMap::new();

        for record in &self.records {
            geometry.entry(record.identifier.clone())
                .or_insert_with(|| Vec::with_capacity(2))
                .push(record.geometry());
        }

        geometry
    }

    /// Averages every identifier that occurs exactly twice
    ///
    /// Identifiers occurring once or three or more times are left out of
    /// the result. The output follows the first-seen order of identifiers.
    pub fn aggregate(&self) -> AggregateSet {
        let groups = self.group_by_identifier();
        let mut aggregated = Vec::with_capacity(groups.len());

        for identifier in self.identifiers() {
            let Some(group) = groups.get(identifier) else {
                continue;
            };

            match require_pair(identifier, group) {
                Ok((first, second)) => aggregated.push(AggregatedRecord::from_pair(first, second)),
                Err(violation) => debug!("Not aggregated: {}", violation),
            }
        }

        AggregateSet::new(aggregated)
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

/// Ascending lexicographic order on identifiers
pub(crate) fn sort_by_identifier<T: SpotStatistics>(records: &mut [T]) {
    records.sort_by(|a, b| a.identifier().cmp(b.identifier()));
}

/// Descending numeric order on a statistic; NaN sorts last
pub(crate) fn sort_by_statistic_descending<T: SpotStatistics>(records: &mut [T], statistic: Statistic) {
    records.sort_by(|a, b| {
        let (x, y) = (a.statistic(statistic), b.statistic(statistic));
        match (x.is_nan(), y.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        }
    });
}
