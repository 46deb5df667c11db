//! TIFF file format parsing module
//!
//! Structure reading for classic TIFF and BigTIFF, and decoding of single
//! pages of multi-page scans.

pub mod ifd;
pub(crate) mod types;
pub mod reader;
pub mod page;
pub(crate) mod constants;
#[cfg(test)]
pub(crate) mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use ifd::{IFD, IFDEntry};
pub use page::{PageDecoder, PageImage, PageInfo};
pub use reader::TiffReader;
pub use types::TiffFile;
