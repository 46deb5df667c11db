//! GPR format constants
//!
//! Fixed layout values of the GenePix results report. Column offsets are
//! zero-based field indices within a tab-separated data row.

/// Required file extension (without the dot)
pub const GPR_EXTENSION: &str = "gpr";

/// Number of leading metadata lines before the first data row
pub const HEADER_LINES: usize = 33;

/// Number of tab-separated fields in a well-formed data row
pub const FIELD_COUNT: usize = 56;

/// Grid-row numbers that mark calibration/control rows
pub const RESERVED_ROWS: [i64; 2] = [17, 18];

/// Identifiers (compared case-insensitively) that mark unprinted spots
pub const BLANK_IDENTIFIERS: [&str; 2] = ["empty", "blank"];

/// Scanner units per image pixel
pub const SCANNER_SCALE: i64 = 10;

/// Column offsets within a data row
pub mod columns {
    pub const BLOCK: usize = 0;
    pub const COLUMN: usize = 1;
    pub const ROW: usize = 2;
    pub const ID: usize = 4;
    pub const X: usize = 5;
    pub const Y: usize = 6;
    pub const DIAMETER: usize = 7;
    pub const A_MEDIAN: usize = 8;           // F650 Median
    pub const B_MEDIAN: usize = 20;          // F550 Median
    pub const A_MEDIAN_MINUS_BG: usize = 45; // F650 Median - B650
    pub const B_MEDIAN_MINUS_BG: usize = 46; // F550 Median - B550
    pub const A_MEAN_MINUS_BG: usize = 47;   // F650 Mean - B650
    pub const B_MEAN_MINUS_BG: usize = 48;   // F550 Mean - B550
    pub const A_SNR: usize = 51;             // SNR 650
    pub const B_SNR: usize = 52;             // SNR 550
}

/// Value substituted for negative mean/median-minus-background statistics
pub const NEGATIVE_STAT_CLAMP: f64 = 1.0;

/// Value substituted for negative signal-to-noise ratios
pub const NEGATIVE_SNR_CLAMP: f64 = 0.0;
