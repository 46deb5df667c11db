//! Command pattern interfaces
//!
//! Every CLI subcommand is a `Command`; the factory maps parsed arguments
//! to the matching implementation.

use crate::errors::GprResult;
use crate::utils::logger::Logger;

/// Represents an executable command in the application
pub trait Command {
    /// Execute the command
    ///
    /// # Returns
    /// `Ok` once the run finished, even if single files of a batch failed;
    /// an error only when the run could not start
    fn execute(&self) -> GprResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Create a new Command instance based on CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    fn create_command(&self, args: &clap::ArgMatches, logger: &'a Logger) -> GprResult<Box<dyn Command + 'a>>;
}
