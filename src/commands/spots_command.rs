//! Paired-spot extraction command
//!
//! Every `.tif`/`.tiff` scan of a directory is paired with the `.gpr` file
//! of the same stem. Crops land in `<dir>/results/<stem>/<label>/<id>.png`.

use clap::ArgMatches;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::commands::batch::{self, BatchOutcome};
use crate::commands::command_traits::Command;
use crate::config::ExtractionConfig;
use crate::errors::{GprError, GprResult};
use crate::extractor::{ExtractionSummary, SpotExtractor};
use crate::gpr::constants::GPR_EXTENSION;
use crate::gpr::{GprReader, IdentifierFilter, SpotSet};
use crate::settings::{ScanSettings, ToneSettings};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Name of the output directory created inside the input directory
pub const RESULTS_DIR: &str = "results";

/// Scan extensions picked up by the batch
const SCAN_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

pub struct SpotsCommand<'a> {
    input_dir: PathBuf,
    config: ExtractionConfig,
    filter: IdentifierFilter,
    tone: Option<ToneSettings>,
    logger: &'a Logger,
}

impl<'a> SpotsCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> GprResult<Self> {
        let input_dir = batch::required_path(args, "dir")?;
        let config = batch::load_config(args)?;
        let filter = batch::load_filter(args);

        let tone = match args.get_one::<String>("settings") {
            Some(path) => {
                let settings = ScanSettings::read(path)?;
                info!("Scanner settings: brightness {}, contrast {}", settings.brightness, settings.contrast);
                Some(settings.tone())
            }
            None => None,
        };

        if !filter.is_empty() {
            info!("Restricting extraction to the listed identifiers");
        }

        Ok(SpotsCommand {
            input_dir,
            config,
            filter,
            tone,
            logger,
        })
    }

    fn gpr_for_scan(scan: &Path) -> GprResult<PathBuf> {
        let gpr = scan.with_extension(GPR_EXTENSION);
        if gpr.is_file() {
            Ok(gpr)
        } else {
            Err(GprError::FormatError(format!("no matching {} for {}", gpr.display(), scan.display())))
        }
    }

    fn load_spots(&self, scan: &Path) -> GprResult<SpotSet> {
        let gpr = Self::gpr_for_scan(scan)?;
        GprReader::with_config(self.logger, self.config.parser.clone()).read(gpr)
    }

    fn process_scan(
        &self,
        extractor: &SpotExtractor,
        scan: &Path,
        spots: &SpotSet,
        progress: &ProgressTracker
    ) -> GprResult<ExtractionSummary> {
        let out_dir = self.input_dir.join(RESULTS_DIR).join(batch::file_stem(scan)?);
        let mut total = ExtractionSummary::default();

        for (label, summary) in extractor.extract_scan(scan, spots, &self.filter, &out_dir, progress)? {
            info!("{} {}: {}", scan.display(), label, summary);
            total.merge(summary);
        }
        Ok(total)
    }
}

impl<'a> Command for SpotsCommand<'a> {
    fn execute(&self) -> GprResult<()> {
        let scans = batch::files_with_extension(&self.input_dir, &SCAN_EXTENSIONS)?;
        info!("Found {} scans in {}", scans.len(), self.input_dir.display());

        let extractor = SpotExtractor::new(self.logger, &self.config, self.tone);
        let mut outcome = BatchOutcome::default();

        // Parse every GPR up front so the progress total is known
        let mut jobs = Vec::with_capacity(scans.len());
        for scan in scans {
            match self.load_spots(&scan) {
                Ok(spots) => jobs.push((scan, spots)),
                Err(e) => outcome.record::<()>(&scan, Err(e)),
            }
        }

        let total: u64 = jobs.iter().map(|(_, spots)| extractor.work_units(spots, &self.filter)).sum();
        let progress = ProgressTracker::new(total, "Extracting spots");

        for (scan, spots) in &jobs {
            if spots.is_empty() {
                warn!("{} has no usable spots", spots.source());
            }
            let result = self.process_scan(&extractor, scan, spots, &progress);
            outcome.record(scan, result);
        }

        progress.finish();
        outcome.log("Spot extraction");
        Ok(())
    }
}
