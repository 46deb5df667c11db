//! Handler for Deflate compressed data

use std::io::Read;
use flate2::read::ZlibDecoder;
use crate::errors::{GprError, GprResult};
use super::handler::CompressionHandler;

/// Deflate (zlib stream) handler
///
/// Serves both the Adobe code 8 and the legacy code 32946, which carry the
/// same payload.
pub struct DeflateHandler {
    code: u64,
}

impl DeflateHandler {
    pub fn new(code: u64) -> Self {
        DeflateHandler { code }
    }
}

impl CompressionHandler for DeflateHandler {
    fn decompress(&self, data: &[u8]) -> GprResult<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(data);
        let mut decompressed_data = Vec::new();
        decoder.read_to_end(&mut decompressed_data)
            .map_err(|e| GprError::InvalidTiff(format!("Deflate stream error: {}", e)))?;
        Ok(decompressed_data)
    }

    fn name(&self) -> &'static str {
        if self.code == 8 { "Adobe Deflate" } else { "Deflate" }
    }

    fn code(&self) -> u64 {
        self.code
    }
}
