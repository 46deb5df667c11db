//! Uniform grid splitting command

use clap::ArgMatches;
use log::info;
use std::path::PathBuf;

use crate::commands::batch;
use crate::commands::command_traits::Command;
use crate::config::ExtractionConfig;
use crate::errors::GprResult;
use crate::extractor::GridSplitter;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

pub struct GridCommand<'a> {
    input: PathBuf,
    output_dir: PathBuf,
    config: ExtractionConfig,
    logger: &'a Logger,
}

impl<'a> GridCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> GprResult<Self> {
        let input = batch::required_path(args, "image")?;
        let config = batch::load_config(args)?;

        // Cells go next to the image unless --out is given
        let output_dir = match args.get_one::<String>("out") {
            Some(dir) => PathBuf::from(dir),
            None => input.parent().map(PathBuf::from).unwrap_or_default(),
        };

        Ok(GridCommand {
            input,
            output_dir,
            config,
            logger,
        })
    }
}

impl<'a> Command for GridCommand<'a> {
    fn execute(&self) -> GprResult<()> {
        let splitter = GridSplitter::new(self.logger, self.config.grid);
        let progress = ProgressTracker::new(0, "Splitting");

        let summary = splitter.split_file(&self.input, &self.output_dir, &progress)?;

        progress.finish();
        info!("Grid split of {}: {}", self.input.display(), summary);
        Ok(())
    }
}
