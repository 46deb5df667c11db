//! Decompression of TIFF strip and tile payloads
//!
//! Each supported scheme is a `CompressionHandler` chosen by its TIFF code.

mod handler;
mod uncompressed;
mod deflate;
mod factory;
mod packbits;
mod zstd_handler;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use deflate::DeflateHandler;
pub use factory::CompressionFactory;
pub use packbits::PackBitsHandler;
pub use zstd_handler::ZstdHandler;
