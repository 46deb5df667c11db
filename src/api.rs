use std::path::{Path, PathBuf};

use log::info;

use crate::config::ExtractionConfig;
use crate::errors::{GprError, GprResult};
use crate::extractor::{ExtractionSummary, GridSplitter, SpotExtractor};
use crate::gpr::report::write_reports;
use crate::gpr::{GprReader, IdentifierFilter, SpotSet};
use crate::settings::ScanSettings;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Main interface to the gprkit library
pub struct GprKit {
    logger: Logger,
    config: ExtractionConfig,
}

impl GprKit {
    /// Create a new GprKit instance with the default configuration
    ///
    /// # Arguments
    /// * `log_file` - Optional path to a run log; without one, run summaries
    ///   are discarded
    ///
    /// # Returns
    /// A GprKit instance or an error if the log file cannot be created
    pub fn new(log_file: Option<&str>) -> GprResult<Self> {
        let logger = match log_file {
            Some(path) => Logger::new(path)?,
            None => Logger::detached(),
        };
        Ok(GprKit {
            logger,
            config: ExtractionConfig::default(),
        })
    }

    /// Replaces the configuration after validating it
    pub fn with_config(mut self, config: ExtractionConfig) -> GprResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Parse a GPR file with the configured layout
    pub fn read_gpr<P: AsRef<Path>>(&self, path: P) -> GprResult<SpotSet> {
        GprReader::with_config(&self.logger, self.config.parser.clone()).read(path)
    }

    /// Write the per-channel CSV files and rankings of one GPR file
    ///
    /// # Returns
    /// Paths of the files written under `out_dir`
    pub fn write_reports<P: AsRef<Path>>(&self, gpr_path: P, out_dir: &Path, filter: &IdentifierFilter) -> GprResult<Vec<PathBuf>> {
        let gpr_path = gpr_path.as_ref();
        let mut set = self.read_gpr(gpr_path)?;
        let stem = gpr_path.file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| GprError::FormatError(format!("no file name in {}", gpr_path.display())))?;

        write_reports(&mut set, &self.config.channels, filter, out_dir, stem)
    }

    /// Extract one crop per paired identifier and configured channel
    ///
    /// # Arguments
    /// * `scan_path` - Multi-page TIFF scan
    /// * `gpr_path` - GPR report describing the spots on the scan
    /// * `out_dir` - Receives `<label>/<identifier>.png`
    /// * `filter` - Identifiers to extract; empty for all
    /// * `settings_path` - Optional scanner settings file for brightness/contrast
    ///
    /// # Returns
    /// One summary per channel label
    pub fn extract_spots<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        scan_path: P,
        gpr_path: Q,
        out_dir: &Path,
        filter: &IdentifierFilter,
        settings_path: Option<&Path>,
    ) -> GprResult<Vec<(String, ExtractionSummary)>> {
        let spots = self.read_gpr(gpr_path)?;
        let tone = match settings_path {
            Some(path) => Some(ScanSettings::read(path)?.tone()),
            None => None,
        };

        let extractor = SpotExtractor::new(&self.logger, &self.config, tone);
        let results = extractor.extract_scan(scan_path, &spots, filter, out_dir, &ProgressTracker::hidden())?;

        info!("Extracted {} channels", results.len());
        Ok(results)
    }

    /// Split an image into uniform grid cells under `<out_dir>/<stem>/`
    pub fn split_grid<P: AsRef<Path>>(&self, image_path: P, out_dir: &Path) -> GprResult<ExtractionSummary> {
        GridSplitter::new(&self.logger, self.config.grid)
            .split_file(image_path, out_dir, &ProgressTracker::hidden())
    }

    /// Read the brightness and contrast bytes of a scanner settings file
    pub fn read_settings<P: AsRef<Path>>(&self, path: P) -> GprResult<ScanSettings> {
        ScanSettings::read(path)
    }
}
