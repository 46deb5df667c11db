//! CLI command implementations
//!
//! Each subcommand is implemented with the Command pattern; the factory
//! picks one from the parsed arguments.

pub mod command_traits;
pub mod batch;
pub mod report_command;
pub mod spots_command;
pub mod grid_command;
pub mod settings_command;

pub use command_traits::{Command, CommandFactory};
pub use grid_command::GridCommand;
pub use report_command::ReportCommand;
pub use settings_command::SettingsCommand;
pub use spots_command::SpotsCommand;

use clap::ArgMatches;

use crate::errors::{GprError, GprResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
#[derive(Debug, Default)]
pub struct GprkitCommandFactory;

impl GprkitCommandFactory {
    pub fn new() -> Self {
        GprkitCommandFactory
    }
}

impl<'a> CommandFactory<'a> for GprkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> GprResult<Box<dyn Command + 'a>> {
        match args.subcommand() {
            Some(("report", sub)) => Ok(Box::new(ReportCommand::new(sub, logger)?)),
            Some(("spots", sub)) => Ok(Box::new(SpotsCommand::new(sub, logger)?)),
            Some(("grid", sub)) => Ok(Box::new(GridCommand::new(sub, logger)?)),
            Some(("settings", sub)) => Ok(Box::new(SettingsCommand::new(sub, logger)?)),
            Some((other, _)) => Err(GprError::GenericError(format!("Unknown command: {}", other))),
            None => Err(GprError::GenericError("No command given".to_string())),
        }
    }
}
