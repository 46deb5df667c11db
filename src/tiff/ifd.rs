//! Image File Directory (IFD) structures
//!
//! Each page of a scan is described by one IFD. Entries keep the raw bytes
//! of their value field so inline arrays decode correctly in either byte
//! order.

use std::collections::HashMap;
use std::fmt;
use log::trace;

use crate::errors::{GprError, GprResult};
use crate::tiff::constants::{field_types, tags};

/// One page directory of a TIFF file
#[derive(Debug, Clone)]
pub struct IFD {
    /// Entries in file order
    pub entries: Vec<IFDEntry>,
    /// IFD number (0-based page index)
    pub number: usize,
    /// Offset to this IFD in the file
    pub offset: u64,
    tag_map: HashMap<u16, usize>,
}

/// Tag entry of an IFD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IFDEntry {
    pub tag: u16,
    pub field_type: u16,
    /// Number of values
    pub count: u64,
    /// Value field interpreted as an offset in the file byte order
    pub value_offset: u64,
    /// Value field bytes as stored, 4 for classic TIFF and 8 for BigTIFF
    pub raw_value: [u8; 8],
}

impl IFDEntry {
    pub fn new(tag: u16, field_type: u16, count: u64, value_offset: u64, raw_value: [u8; 8]) -> Self {
        IFDEntry {
            tag,
            field_type,
            count,
            value_offset,
            raw_value,
        }
    }

    /// Size in bytes of one value of this entry's type
    pub fn field_type_size(&self) -> usize {
        match self.field_type {
            field_types::BYTE | field_types::ASCII | field_types::SBYTE | field_types::UNDEFINED => 1,
            field_types::SHORT | field_types::SSHORT => 2,
            field_types::LONG | field_types::SLONG | field_types::FLOAT | field_types::IFD => 4,
            field_types::RATIONAL | field_types::SRATIONAL | field_types::DOUBLE => 8,
            field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => 8,
            _ => 1,
        }
    }

    /// Total payload size in bytes, an error when the count overflows it
    pub fn payload_size(&self) -> GprResult<u64> {
        (self.field_type_size() as u64).checked_mul(self.count).ok_or_else(|| {
            GprError::InvalidTiff(format!("tag {} declares too many values: {}", self.tag, self.count))
        })
    }

    /// Whether the values fit in the value field instead of living at an offset
    ///
    /// An overflowing payload is never inline.
    pub fn is_value_inline(&self, is_big_tiff: bool) -> bool {
        let inline_size = if is_big_tiff { 8 } else { 4 };
        let inline = self.payload_size().map_or(false, |size| size <= inline_size);
        trace!("Tag {} count {}, inline: {}", self.tag, self.count, inline);
        inline
    }

    /// Whether the field type is an unsigned integer type the decoder reads
    pub fn is_integer(&self) -> bool {
        matches!(
            self.field_type,
            field_types::BYTE | field_types::SHORT | field_types::LONG
                | field_types::LONG8 | field_types::IFD | field_types::IFD8
        )
    }
}

impl IFD {
    pub fn new(number: usize, offset: u64) -> Self {
        IFD {
            entries: Vec::new(),
            number,
            offset,
            tag_map: HashMap::new(),
        }
    }

    /// Adds an entry; a repeated tag replaces the earlier lookup target
    pub fn add_entry(&mut self, entry: IFDEntry) {
        self.tag_map.insert(entry.tag, self.entries.len());
        self.entries.push(entry);
    }

    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.tag_map.get(&tag).map(|&index| &self.entries[index])
    }

    pub fn has_tag(&self, tag: u16) -> bool {
        self.tag_map.contains_key(&tag)
    }

    /// Whether pixel data is organised in tiles
    pub fn is_tiled(&self) -> bool {
        self.has_tag(tags::TILE_WIDTH) && self.has_tag(tags::TILE_OFFSETS)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD #{} (offset: {})", self.number, self.offset)?;
        writeln!(f, "  Number of entries: {}", self.entries.len())?;
        for entry in &self.entries {
            writeln!(f, "    tag {} type {} count {} value/offset {}",
                     entry.tag, entry.field_type, entry.count, entry.value_offset)?;
        }
        Ok(())
    }
}
