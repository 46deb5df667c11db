//! GPR report command
//!
//! Turns every `.gpr` file of a directory into per-channel CSV files and
//! averaged rankings under `<dir>/gpr_results/`.

use clap::ArgMatches;
use log::info;
use std::path::{Path, PathBuf};

use crate::commands::batch::{self, BatchOutcome};
use crate::commands::command_traits::Command;
use crate::config::ExtractionConfig;
use crate::errors::GprResult;
use crate::gpr::constants::GPR_EXTENSION;
use crate::gpr::report::write_reports;
use crate::gpr::{GprReader, IdentifierFilter};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Name of the output directory created inside the input directory
pub const REPORT_DIR: &str = "gpr_results";

pub struct ReportCommand<'a> {
    input_dir: PathBuf,
    config: ExtractionConfig,
    filter: IdentifierFilter,
    logger: &'a Logger,
}

impl<'a> ReportCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> GprResult<Self> {
        let input_dir = batch::required_path(args, "dir")?;
        let config = batch::load_config(args)?;
        let filter = batch::load_filter(args);

        info!("Report input directory: {}", input_dir.display());

        Ok(ReportCommand {
            input_dir,
            config,
            filter,
            logger,
        })
    }

    fn process_file(&self, path: &Path, out_dir: &Path) -> GprResult<usize> {
        let reader = GprReader::with_config(self.logger, self.config.parser.clone());
        let mut set = reader.read(path)?;
        let stem = batch::file_stem(path)?;

        let written = write_reports(&mut set, &self.config.channels, &self.filter, out_dir, &stem)?;
        self.logger.log_summary(&path.display().to_string(), &[
            ("spots", set.len().to_string()),
            ("skipped rows", set.skipped().total().to_string()),
            ("files written", written.len().to_string()),
        ])?;
        Ok(written.len())
    }
}

impl<'a> Command for ReportCommand<'a> {
    fn execute(&self) -> GprResult<()> {
        let files = batch::files_with_extension(&self.input_dir, &[GPR_EXTENSION])?;
        let out_dir = self.input_dir.join(REPORT_DIR);
        info!("Found {} GPR files, writing reports to {}", files.len(), out_dir.display());

        let progress = ProgressTracker::new(files.len() as u64, "Writing reports");
        let mut outcome = BatchOutcome::default();

        for path in &files {
            progress.set_message(&path.display().to_string());
            outcome.record(path, self.process_file(path, &out_dir));
            progress.increment(1);
        }

        progress.finish();
        outcome.log("Report run");
        Ok(())
    }
}
