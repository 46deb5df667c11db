//! Parsed TIFF file structure

use crate::io::byte_order::ByteOrder;
use crate::tiff::ifd::IFD;
use std::fmt;

/// Layout of a TIFF file: its byte order, variant and page directories
#[derive(Debug)]
pub struct TiffFile {
    pub ifds: Vec<IFD>,
    pub is_big_tiff: bool,
    pub byte_order: ByteOrder,
}

impl TiffFile {
    pub fn new(is_big_tiff: bool, byte_order: ByteOrder) -> Self {
        TiffFile {
            ifds: Vec::new(),
            is_big_tiff,
            byte_order,
        }
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.ifds.len()
    }

    pub fn page(&self, index: usize) -> Option<&IFD> {
        self.ifds.get(index)
    }
}

impl fmt::Display for TiffFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TIFF File:")?;
        writeln!(f, "  Format: {}", if self.is_big_tiff { "BigTIFF" } else { "TIFF" })?;
        writeln!(f, "  Byte order: {}", self.byte_order.name())?;
        writeln!(f, "  Pages: {}", self.ifds.len())?;
        Ok(())
    }
}
