//! GPR result file handling
//!
//! This module parses the tab-separated GenePix results report into spot
//! records, groups replicate spots per identifier and exports summaries.

pub mod constants;
pub mod record;
pub mod parser;
pub mod spot_set;
pub mod aggregate;
pub mod filter;
pub mod report;
#[cfg(test)]
pub(crate) mod tests;

pub use aggregate::{require_pair, AggregateSet, PairViolation};
pub use filter::IdentifierFilter;
pub use parser::GprReader;
pub use record::{AggregatedRecord, SpotGeometry, SpotRecord, SpotStatistics, Statistic};
pub use spot_set::{SkipCounts, SpotSet};
