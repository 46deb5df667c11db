//! GPR file reader
//!
//! Reads the tab-separated GenePix results report into a `SpotSet`.
//! Structural problems on a single row are logged and the row skipped;
//! an unparseable numeric field aborts the whole file.

use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::ParserConfig;
use crate::errors::{GprError, GprResult};
use crate::gpr::constants::{columns, GPR_EXTENSION, NEGATIVE_SNR_CLAMP, NEGATIVE_STAT_CLAMP};
use crate::gpr::record::SpotRecord;
use crate::gpr::spot_set::{SkipCounts, SpotSet};
use crate::utils::logger::Logger;

/// Reader for GPR result files
pub struct GprReader<'a> {
    /// Logger for recording operations
    logger: &'a Logger,
    /// Layout rules
    config: ParserConfig,
}

impl<'a> GprReader<'a> {
    /// Creates a reader with the standard GenePix layout
    pub fn new(logger: &'a Logger) -> Self {
        GprReader {
            logger,
            config: ParserConfig::default(),
        }
    }

    /// Creates a reader with a custom layout
    pub fn with_config(logger: &'a Logger, config: ParserConfig) -> Self {
        GprReader { logger, config }
    }

    /// Loads and parses a GPR file
    ///
    /// # Arguments
    /// * `path` - Path to a file with the `.gpr` extension
    ///
    /// # Returns
    /// The parsed spot set, a `FormatError` if the extension is wrong,
    /// an `IoError` if the file cannot be read or a `ParseError` if any
    /// numeric field is malformed
    pub fn read<P: AsRef<Path>>(&self, path: P) -> GprResult<SpotSet> {
        let path = path.as_ref();
        if !has_gpr_extension(path) {
            return Err(GprError::FormatError(format!("not a gpr file: {}", path.display())));
        }

        info!("Loading GPR file: {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(1024 * 1024, file);

        self.parse(reader, &path.display().to_string())
    }

    /// Parses GPR content from any buffered reader
    ///
    /// The header block is consumed line by line; the body is handed to a
    /// tab-delimited `csv::Reader` so quoted fields may hold tabs.
    ///
    /// # Arguments
    /// * `reader` - Source of the report text
    /// * `source` - Name used in log messages and stored on the result
    pub fn parse<R: BufRead>(&self, mut reader: R, source: &str) -> GprResult<SpotSet> {
        let header_offset = self.skip_header(&mut reader)?;

        let mut body = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::with_capacity(10_000);
        let mut skipped = SkipCounts::default();
        let mut raw = csv::ByteRecord::new();

        while body.read_byte_record(&mut raw)? {
            let line_number = header_offset + raw.position().map(|p| p.line() as usize).unwrap_or(0);

            // Reports are not guaranteed to be UTF-8
            let fields: Vec<String> = raw.iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect();

            if fields.len() != self.config.field_count {
                let error = GprError::StructuralError { line: line_number, fields: fields.len() };
                warn!("{}: {}", source, error);
                skipped.structural += 1;
                continue;
            }

            if self.is_reserved_row(&fields[columns::ROW]) {
                debug!("Skipping reserved row at line {}", line_number);
                skipped.reserved += 1;
                continue;
            }

            if self.is_blank_identifier(&fields[columns::ID]) {
                debug!("Skipping blank spot at line {}", line_number);
                skipped.blank += 1;
                continue;
            }

            records.push(parse_record(&fields, line_number)?);
        }

        info!("Parsed {} spots from {} ({} malformed, {} reserved, {} blank rows skipped)",
              records.len(), source, skipped.structural, skipped.reserved, skipped.blank);
        self.logger.log(&format!("Parsed {} spots from {}, skipped {} malformed rows",
                                 records.len(), source, skipped.structural))?;

        Ok(SpotSet::new(source, records, skipped))
    }

    /// Consumes the header block, returning the number of physical lines read
    ///
    /// Blank lines do not count towards the header.
    fn skip_header<R: BufRead>(&self, reader: &mut R) -> GprResult<usize> {
        let mut buffer = Vec::new();
        let mut consumed = 0usize;
        let mut remaining = self.config.header_lines;

        while remaining > 0 {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            consumed += 1;

            let blank = buffer.iter().all(|&b| matches!(b, b'\n' | b'\r'));
            if !blank {
                remaining -= 1;
            }
        }

        debug!("Skipped {} header lines", consumed);
        Ok(consumed)
    }

    fn is_reserved_row(&self, field: &str) -> bool {
        match field.trim().parse::<i64>() {
            Ok(row) => self.config.reserved_rows.contains(&row),
            Err(_) => false,
        }
    }

    fn is_blank_identifier(&self, field: &str) -> bool {
        self.config.blank_identifiers.iter()
            .any(|blank| blank.eq_ignore_ascii_case(field.trim()))
    }
}

/// Whether a path carries the `.gpr` extension
pub fn has_gpr_extension(path: &Path) -> bool {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(|ext| ext == GPR_EXTENSION)
        .unwrap_or(false)
}

/// Builds a record from a validated row, applying the negative-value clamps
fn parse_record(fields: &[String], line: usize) -> GprResult<SpotRecord> {
    let int = |column: usize| parse_field::<i64>(fields, column, line);
    let float = |column: usize| parse_field::<f64>(fields, column, line);

    Ok(SpotRecord {
        identifier: fields[columns::ID].clone(),
        block: int(columns::BLOCK)?,
        column: int(columns::COLUMN)?,
        row: int(columns::ROW)?,
        x: int(columns::X)?,
        y: int(columns::Y)?,
        diameter: int(columns::DIAMETER)?,
        a_median_raw: float(columns::A_MEDIAN)?,
        b_median_raw: float(columns::B_MEDIAN)?,
        a_median: clamp_statistic(float(columns::A_MEDIAN_MINUS_BG)?),
        b_median: clamp_statistic(float(columns::B_MEDIAN_MINUS_BG)?),
        a_mean: clamp_statistic(float(columns::A_MEAN_MINUS_BG)?),
        b_mean: clamp_statistic(float(columns::B_MEAN_MINUS_BG)?),
        a_snr: clamp_snr(float(columns::A_SNR)?),
        b_snr: clamp_snr(float(columns::B_SNR)?),
    })
}

fn parse_field<T: std::str::FromStr>(fields: &[String], column: usize, line: usize) -> GprResult<T> {
    let raw = fields[column].trim();
    raw.parse::<T>().map_err(|_| GprError::ParseError {
        line,
        column,
        value: raw.to_string(),
    })
}

/// Negative mean/median statistics are scanner error codes
pub fn clamp_statistic(value: f64) -> f64 {
    if value < 0.0 { NEGATIVE_STAT_CLAMP } else { value }
}

/// Negative signal-to-noise ratios are scanner error codes
pub fn clamp_snr(value: f64) -> f64 {
    if value < 0.0 { NEGATIVE_SNR_CLAMP } else { value }
}
