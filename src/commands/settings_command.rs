//! Prints the brightness/contrast bytes of a scanner settings file

use clap::ArgMatches;
use std::path::PathBuf;

use crate::commands::batch;
use crate::commands::command_traits::Command;
use crate::errors::GprResult;
use crate::settings::ScanSettings;
use crate::utils::logger::Logger;

pub struct SettingsCommand<'a> {
    input: PathBuf,
    logger: &'a Logger,
}

impl<'a> SettingsCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> GprResult<Self> {
        Ok(SettingsCommand {
            input: batch::required_path(args, "file")?,
            logger,
        })
    }
}

impl<'a> Command for SettingsCommand<'a> {
    fn execute(&self) -> GprResult<()> {
        let settings = ScanSettings::read(&self.input)?;
        let tone = settings.tone();

        println!("{}", self.input.display());
        println!("  Brightness: {} (offset {:+})", settings.brightness, tone.brightness);
        println!("  Contrast:   {} ({:+.1}%)", settings.contrast, tone.contrast);

        self.logger.log_summary(&self.input.display().to_string(), &[
            ("brightness", settings.brightness.to_string()),
            ("contrast", settings.contrast.to_string()),
        ])?;
        Ok(())
    }
}
