//! Factory for creating compression handlers

use crate::errors::{GprError, GprResult};
use crate::tiff::constants::compression;
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::deflate::DeflateHandler;
use super::packbits::PackBitsHandler;
use super::zstd_handler::ZstdHandler;

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create a compression handler for the given compression code
    pub fn create_handler(code: u64) -> GprResult<Box<dyn CompressionHandler>> {
        match code {
            compression::NONE => Ok(Box::new(UncompressedHandler)),
            compression::ADOBE_DEFLATE | compression::DEFLATE => Ok(Box::new(DeflateHandler::new(code))),
            compression::ZSTD | compression::ZSTD_LEGACY => Ok(Box::new(ZstdHandler::new(code))),
            compression::PACKBITS => Ok(Box::new(PackBitsHandler)),
            _ => Err(GprError::UnsupportedCompression(code))
        }
    }

    /// Whether a handler exists for the code
    pub fn is_supported(code: u64) -> bool {
        Self::create_handler(code).is_ok()
    }
}
