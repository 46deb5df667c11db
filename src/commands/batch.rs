//! Helpers shared by the directory-driven commands

use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExtractionConfig;
use crate::errors::{GprError, GprResult};
use crate::gpr::IdentifierFilter;

/// Outcome of a batch over several input files
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: Vec<PathBuf>,
}

impl BatchOutcome {
    /// Records the result of one file, logging failures
    pub fn record<T>(&mut self, path: &Path, result: GprResult<T>) {
        match result {
            Ok(_) => self.succeeded += 1,
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                self.failed.push(path.to_path_buf());
            }
        }
    }

    pub fn log(&self, what: &str) {
        info!("{}: {} succeeded, {} failed", what, self.succeeded, self.failed.len());
    }
}

/// Files directly inside `dir` whose extension matches one of `extensions`
/// (case-insensitive), sorted by name
pub fn files_with_extension(dir: &Path, extensions: &[&str]) -> GprResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(GprError::GenericError(format!("not a directory: {}", dir.display())));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path.extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// File stem as UTF-8, or a `FormatError`
pub fn file_stem(path: &Path) -> GprResult<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| GprError::FormatError(format!("no usable file name in {}", path.display())))
}

/// Loads `--config` if given, otherwise the defaults
pub fn load_config(args: &clap::ArgMatches) -> GprResult<ExtractionConfig> {
    match args.get_one::<String>("config") {
        Some(path) => {
            info!("Using configuration file {}", path);
            ExtractionConfig::from_file(path)
        }
        None => Ok(ExtractionConfig::default()),
    }
}

/// Parses `--proteins a,b,c` into a filter; absent means all identifiers
pub fn load_filter(args: &clap::ArgMatches) -> IdentifierFilter {
    args.get_one::<String>("proteins")
        .map(|list| IdentifierFilter::parse_list(list))
        .unwrap_or_default()
}

/// Required positional path argument
pub fn required_path(args: &clap::ArgMatches, name: &str) -> GprResult<PathBuf> {
    args.get_one::<String>(name)
        .map(PathBuf::from)
        .ok_or_else(|| GprError::GenericError(format!("Missing argument: {}", name)))
}
