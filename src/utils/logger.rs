//! Logger utility for application-wide logging
//!
//! Works alongside the standard log crate and mirrors every record into a
//! run log file next to the console output.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata, LevelFilter};

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output, `None` when running without a log file
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a logger writing to `log_file`
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    pub fn new<P: AsRef<Path>>(log_file: P) -> io::Result<Self> {
        let file = File::create(log_file.as_ref())?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// Creates a logger that discards run messages
    pub fn detached() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    /// Appends a line to the run log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Writes a per-file summary block to the run log
    ///
    /// # Arguments
    ///
    /// * `source` - File the summary belongs to
    /// * `entries` - Label/value pairs, written one per line
    pub fn log_summary(&self, source: &str, entries: &[(&str, String)]) -> io::Result<()> {
        self.log(&format!("Summary for {}:", source))?;
        for (label, value) in entries {
            self.log(&format!("  {}: {}", label, value))?;
        }
        Ok(())
    }

    /// Installs a file-backed logger as the global `log` backend
    pub fn init_global_logger<P: AsRef<Path>>(log_file: P) -> io::Result<()> {
        let global_logger = Logger::new(log_file)?;

        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(LevelFilter::Debug);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = Logger::log(self, &message);

            if record.level() <= Level::Info {
                println!("{}", message);
            }
        }
    }

    fn flush(&self) {}
}
