//! Spot record types
//!
//! A `SpotRecord` is one physical grid position as reported by the scanner.
//! An `AggregatedRecord` is the per-identifier average of exactly two
//! spot records.

use std::fmt;

use crate::channel::Channel;

/// Statistics that can be used to rank records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Channel A mean minus background
    AMean,
    /// Channel A median minus background
    AMedian,
    /// Channel B mean minus background
    BMean,
    /// Channel B median minus background
    BMedian,
}

impl Statistic {
    /// All rankable statistics, in report order
    pub const ALL: [Statistic; 4] = [
        Statistic::AMean,
        Statistic::AMedian,
        Statistic::BMean,
        Statistic::BMedian,
    ];

    /// Channel the statistic was measured on
    pub fn channel(&self) -> Channel {
        match self {
            Statistic::AMean | Statistic::AMedian => Channel::A,
            Statistic::BMean | Statistic::BMedian => Channel::B,
        }
    }

    /// Whether this is a median statistic
    pub fn is_median(&self) -> bool {
        matches!(self, Statistic::AMedian | Statistic::BMedian)
    }

    /// Column header as printed by the scanner software
    pub fn label(&self) -> &'static str {
        match self {
            Statistic::AMean => "F650 Mean - B650",
            Statistic::AMedian => "F650 Median - B650",
            Statistic::BMean => "F550 Mean - B550",
            Statistic::BMedian => "F550 Median - B550",
        }
    }

    /// Short name used in file names and on the command line
    pub fn short_name(&self) -> &'static str {
        match self {
            Statistic::AMean => "a-mean",
            Statistic::AMedian => "a-median",
            Statistic::BMean => "b-mean",
            Statistic::BMedian => "b-median",
        }
    }

    /// Parse a short name
    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL.iter()
            .copied()
            .find(|s| s.short_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Access to the rankable statistics of a record
///
/// Implemented by both raw and aggregated records so that the orderings
/// can be shared.
pub trait SpotStatistics {
    /// Biological identifier
    fn identifier(&self) -> &str;

    /// Value of one rankable statistic
    fn statistic(&self, statistic: Statistic) -> f64;

    /// Signal-to-noise ratio for a channel
    fn snr(&self, channel: Channel) -> f64;
}

/// Scanner geometry of one spot, in scanner units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotGeometry {
    /// Spot center X
    pub x: i64,
    /// Spot center Y
    pub y: i64,
    /// Spot diameter
    pub diameter: i64,
}

impl SpotGeometry {
    pub fn new(x: i64, y: i64, diameter: i64) -> Self {
        SpotGeometry { x, y, diameter }
    }

    /// Half the diameter, rounded toward zero
    pub fn radius(&self) -> i64 {
        self.diameter / 2
    }
}

/// One parsed data row of a GPR file
#[derive(Debug, Clone, PartialEq)]
pub struct SpotRecord {
    pub identifier: String,
    pub block: i64,
    pub column: i64,
    pub row: i64,
    pub x: i64,
    pub y: i64,
    pub diameter: i64,
    /// Raw channel A median (F650 Median)
    pub a_median_raw: f64,
    /// Raw channel B median (F550 Median)
    pub b_median_raw: f64,
    pub a_median: f64,
    pub b_median: f64,
    pub a_mean: f64,
    pub b_mean: f64,
    pub a_snr: f64,
    pub b_snr: f64,
}

impl SpotRecord {
    /// Scanner geometry of this spot
    pub fn geometry(&self) -> SpotGeometry {
        SpotGeometry::new(self.x, self.y, self.diameter)
    }
}

impl SpotStatistics for SpotRecord {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn statistic(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::AMean => self.a_mean,
            Statistic::AMedian => self.a_median,
            Statistic::BMean => self.b_mean,
            Statistic::BMedian => self.b_median,
        }
    }

    fn snr(&self, channel: Channel) -> f64 {
        match channel {
            Channel::A => self.a_snr,
            Channel::B => self.b_snr,
        }
    }
}

/// Average of the two records sharing an identifier
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord {
    pub identifier: String,
    pub a_median: f64,
    pub b_median: f64,
    pub a_mean: f64,
    pub b_mean: f64,
    pub a_snr: f64,
    pub b_snr: f64,
}

impl AggregatedRecord {
    /// Field-wise arithmetic mean of two records
    pub fn from_pair(first: &SpotRecord, second: &SpotRecord) -> Self {
        let mean = |a: f64, b: f64| (a + b) / 2.0;

        AggregatedRecord {
            identifier: first.identifier.clone(),
            a_median: mean(first.a_median, second.a_median),
            b_median: mean(first.b_median, second.b_median),
            a_mean: mean(first.a_mean, second.a_mean),
            b_mean: mean(first.b_mean, second.b_mean),
            a_snr: mean(first.a_snr, second.a_snr),
            b_snr: mean(first.b_snr, second.b_snr),
        }
    }
}

impl SpotStatistics for AggregatedRecord {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn statistic(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::AMean => self.a_mean,
            Statistic::AMedian => self.a_median,
            Statistic::BMean => self.b_mean,
            Statistic::BMedian => self.b_median,
        }
    }

    fn snr(&self, channel: Channel) -> f64 {
        match channel {
            Channel::A => self.a_snr,
            Channel::B => self.b_snr,
        }
    }
}
