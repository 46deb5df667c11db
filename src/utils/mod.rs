//! Utility modules for common functionality
//!
//! Logging, progress reporting and atomic file output shared by the
//! parser, the extractors and the commands.

pub mod logger;
pub mod progress;
pub mod write_utils;
