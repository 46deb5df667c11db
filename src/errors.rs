//! Custom error types for GPR and scan processing

use std::fmt;
use std::io;

/// Error types shared by the parser, the scan decoder and the extractors
#[derive(Debug)]
pub enum GprError {
    /// I/O error
    IoError(io::Error),
    /// File is not of the expected type
    FormatError(String),
    /// Data row with the wrong number of fields
    StructuralError { line: usize, fields: usize },
    /// Numeric field that could not be parsed
    ParseError { line: usize, column: usize, value: String },
    /// Image decode or encode failure
    ImageError(String),
    /// Malformed TIFF structure
    InvalidTiff(String),
    /// Tag not found
    TagNotFound(u16),
    /// Unsupported compression method
    UnsupportedCompression(u64),
    /// Invalid configuration value
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for GprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GprError::IoError(e) => write!(f, "I/O error: {}", e),
            GprError::FormatError(msg) => write!(f, "Format error: {}", msg),
            GprError::StructuralError { line, fields } =>
                write!(f, "Invalid line length at line {}: {} fields", line, fields),
            GprError::ParseError { line, column, value } =>
                write!(f, "Could not parse '{}' at line {}, column {}", value, line, column),
            GprError::ImageError(msg) => write!(f, "Image error: {}", msg),
            GprError::InvalidTiff(msg) => write!(f, "Invalid TIFF: {}", msg),
            GprError::TagNotFound(tag) => write!(f, "Tag not found: {}", tag),
            GprError::UnsupportedCompression(c) => write!(f, "Unsupported compression method: {}", c),
            GprError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            GprError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for GprError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GprError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GprError {
    fn from(error: io::Error) -> Self {
        GprError::IoError(error)
    }
}

impl From<image::ImageError> for GprError {
    fn from(error: image::ImageError) -> Self {
        GprError::ImageError(error.to_string())
    }
}

impl From<csv::Error> for GprError {
    fn from(error: csv::Error) -> Self {
        match error.into_kind() {
            csv::ErrorKind::Io(e) => GprError::IoError(e),
            other => GprError::GenericError(format!("CSV error: {:?}", other)),
        }
    }
}

impl From<String> for GprError {
    fn from(msg: String) -> Self {
        GprError::GenericError(msg)
    }
}

/// Result type for GPR operations
pub type GprResult<T> = Result<T, GprError>;
