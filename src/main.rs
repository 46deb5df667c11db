use clap::{Arg, Command as ClapCommand};
use log::error;
use std::process;

use gprkit::commands::{CommandFactory, GprkitCommandFactory};
use gprkit::utils::logger::Logger;

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .help("TOML file overriding the default extraction settings")
        .value_name("FILE")
        .required(false)
}

fn proteins_arg() -> Arg {
    Arg::new("proteins")
        .long("proteins")
        .help("Comma-separated identifiers to restrict the run to")
        .value_name("LIST")
        .required(false)
}

fn main() {
    let matches = ClapCommand::new("gprkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Analyze GenePix GPR reports and extract per-spot images from scans")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            ClapCommand::new("report")
                .about("Write per-channel CSV files and rankings for every .gpr in a directory")
                .arg(Arg::new("dir").help("Directory with .gpr files").required(true).index(1))
                .arg(proteins_arg())
                .arg(config_arg()),
        )
        .subcommand(
            ClapCommand::new("spots")
                .about("Extract one image per identifier and channel from every scan in a directory")
                .arg(Arg::new("dir").help("Directory with .tif scans and matching .gpr files").required(true).index(1))
                .arg(proteins_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("settings")
                        .long("settings")
                        .help("Scanner settings file providing brightness and contrast")
                        .value_name("FILE")
                        .required(false),
                ),
        )
        .subcommand(
            ClapCommand::new("grid")
                .about("Split an image into uniform grid cells")
                .arg(Arg::new("image").help("Input image").required(true).index(1))
                .arg(
                    Arg::new("out")
                        .short('o')
                        .long("out")
                        .help("Output directory (defaults to the image's directory)")
                        .value_name("DIR")
                        .required(false),
                )
                .arg(config_arg()),
        )
        .subcommand(
            ClapCommand::new("settings")
                .about("Print the brightness and contrast stored in a scanner settings file")
                .arg(Arg::new("file").help("Scanner settings file").required(true).index(1)),
        )
        .get_matches();

    let logger = match Logger::new("gprkit.log") {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("gprkit-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = GprkitCommandFactory::new();

    match factory.create_command(&matches, &logger) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
