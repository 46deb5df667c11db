//! TIFF file reader implementation
//!
//! Reads the header and the IFD chain of classic TIFF and BigTIFF files in
//! either byte order. Pixel data is left to the page decoder.

use byteorder::ReadBytesExt;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Cursor, SeekFrom};
use std::path::Path;

use crate::errors::{GprError, GprResult};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{field_types, header, MAX_IFD_CHAIN};
use crate::tiff::ifd::{IFD, IFDEntry};
use crate::tiff::types::TiffFile;
use crate::utils::logger::Logger;

/// Reader for TIFF and BigTIFF structure
pub struct TiffReader<'a> {
    byte_order_handler: Option<Box<dyn ByteOrderHandler>>,
    logger: &'a Logger,
    is_big_tiff: bool,
}

impl<'a> TiffReader<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        TiffReader {
            byte_order_handler: None,
            logger,
            is_big_tiff: false,
        }
    }

    fn handler(&self) -> GprResult<&dyn ByteOrderHandler> {
        self.byte_order_handler.as_deref()
            .ok_or_else(|| GprError::GenericError("Byte order not yet determined".to_string()))
    }

    /// Opens a file and reads its structure
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> GprResult<TiffFile> {
        let path = path.as_ref();
        info!("Loading TIFF file: {}", path.display());
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(1024 * 1024, file);
        self.read(&mut reader)
    }

    /// Reads the header and every IFD reachable from it
    ///
    /// The chain stops at a zero offset, at an offset outside the file, at an
    /// offset already visited, or after `MAX_IFD_CHAIN` directories. The
    /// first IFD must be valid; later broken links end the chain with a
    /// warning.
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> GprResult<TiffFile> {
        let file_size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let byte_order = ByteOrder::detect(reader)?;
        self.byte_order_handler = Some(byte_order.create_handler());
        debug!("Byte order: {}", byte_order.name());

        let first_ifd_offset = self.read_header(reader)?;
        let mut tiff = TiffFile::new(self.is_big_tiff, byte_order);

        let header_size = if self.is_big_tiff { 16 } else { 8 };
        if first_ifd_offset < header_size || first_ifd_offset >= file_size {
            return Err(GprError::InvalidTiff(format!(
                "first IFD offset {} outside file of {} bytes", first_ifd_offset, file_size)));
        }

        let mut visited = HashSet::new();
        let mut offset = first_ifd_offset;

        while offset != 0 {
            if tiff.ifds.len() >= MAX_IFD_CHAIN {
                warn!("IFD chain longer than {} entries, stopping", MAX_IFD_CHAIN);
                break;
            }
            if !visited.insert(offset) {
                warn!("IFD chain loops back to offset {}, stopping", offset);
                break;
            }
            if offset >= file_size {
                warn!("IFD offset {} exceeds file size {}, stopping IFD chain", offset, file_size);
                break;
            }

            let (ifd, next_offset) = match self.read_ifd(reader, offset, tiff.ifds.len()) {
                Ok(result) => result,
                Err(e) if tiff.ifds.is_empty() => return Err(e),
                Err(e) => {
                    warn!("Error reading IFD {}: {}", tiff.ifds.len(), e);
                    break;
                }
            };

            debug!("IFD {} at offset {} has {} entries", ifd.number, offset, ifd.entry_count());
            tiff.ifds.push(ifd);
            offset = next_offset;
        }

        info!("Read {} IFDs from TIFF file", tiff.ifds.len());
        self.logger.log(&format!("TIFF: {} pages, {}", tiff.page_count(),
                                 if tiff.is_big_tiff { "BigTIFF" } else { "classic" }))?;
        Ok(tiff)
    }

    /// Validates the version field and returns the first IFD offset
    fn read_header(&mut self, reader: &mut dyn SeekableReader) -> GprResult<u64> {
        let handler = self.handler()?;
        let version = handler.read_u16(reader)?;

        match version {
            header::TIFF_VERSION => {
                let offset = handler.read_u32(reader)? as u64;
                self.is_big_tiff = false;
                Ok(offset)
            }
            header::BIG_TIFF_VERSION => {
                let offset_size = handler.read_u16(reader)?;
                if offset_size != header::BIGTIFF_OFFSET_SIZE {
                    return Err(GprError::InvalidTiff(format!("unsupported BigTIFF offset size {}", offset_size)));
                }
                let _reserved = handler.read_u16(reader)?;
                let offset = handler.read_u64(reader)?;
                self.is_big_tiff = true;
                Ok(offset)
            }
            _ => Err(GprError::InvalidTiff(format!("unknown TIFF version {}", version))),
        }
    }

    /// Reads one IFD and the offset of the next
    pub fn read_ifd(&self, reader: &mut dyn SeekableReader, offset: u64, number: usize) -> GprResult<(IFD, u64)> {
        let handler = self.handler()?;
        reader.seek(SeekFrom::Start(offset))?;

        let entry_count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u16(reader)? as u64
        };

        let mut ifd = IFD::new(number, offset);
        for _ in 0..entry_count {
            ifd.add_entry(self.read_ifd_entry(reader, handler)?);
        }

        let next_offset = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };

        Ok((ifd, next_offset))
    }

    fn read_ifd_entry(&self, reader: &mut dyn SeekableReader, handler: &dyn ByteOrderHandler) -> GprResult<IFDEntry> {
        let tag = handler.read_u16(reader)?;
        let field_type = handler.read_u16(reader)?;

        let mut raw_value = [0u8; 8];
        let (count, value_offset) = if self.is_big_tiff {
            let count = handler.read_u64(reader)?;
            reader.read_exact(&mut raw_value)?;
            let value = handler.read_u64(&mut Cursor::new(&raw_value[..]))?;
            (count, value)
        } else {
            let count = handler.read_u32(reader)? as u64;
            reader.read_exact(&mut raw_value[..4])?;
            let value = handler.read_u32(&mut Cursor::new(&raw_value[..4]))? as u64;
            (count, value)
        };

        Ok(IFDEntry::new(tag, field_type, count, value_offset, raw_value))
    }

    /// Reads every value of an integer tag
    pub fn read_tag_values(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> GprResult<Vec<u64>> {
        let entry = ifd.get_entry(tag).ok_or(GprError::TagNotFound(tag))?;
        if !entry.is_integer() {
            return Err(GprError::InvalidTiff(format!(
                "tag {} has non-integer field type {}", tag, entry.field_type)));
        }

        let handler = self.handler()?;

        if entry.is_value_inline(self.is_big_tiff) {
            let mut cursor = Cursor::new(&entry.raw_value[..]);
            return read_values(&mut cursor, handler, entry);
        }

        let file_size = reader.seek(SeekFrom::End(0))?;
        let end = entry.value_offset.checked_add(entry.payload_size()?);
        if end.map_or(true, |end| end > file_size) {
            return Err(GprError::InvalidTiff(format!(
                "values of tag {} extend past end of file", tag)));
        }

        reader.seek(SeekFrom::Start(entry.value_offset))?;
        read_values(reader, handler, entry)
    }

    /// Reads the first value of an integer tag, or `default` when absent
    pub fn read_tag_or(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16, default: u64) -> GprResult<u64> {
        if !ifd.has_tag(tag) {
            return Ok(default);
        }
        let values = self.read_tag_values(reader, ifd, tag)?;
        values.first().copied()
            .ok_or_else(|| GprError::InvalidTiff(format!("tag {} has no values", tag)))
    }
}

fn read_values(reader: &mut dyn SeekableReader, handler: &dyn ByteOrderHandler, entry: &IFDEntry) -> GprResult<Vec<u64>> {
    let mut values = Vec::with_capacity(entry.count.min(1 << 16) as usize);
    for _ in 0..entry.count {
        let value = match entry.field_type {
            field_types::BYTE => reader.read_u8()? as u64,
            field_types::SHORT => handler.read_u16(reader)? as u64,
            field_types::LONG | field_types::IFD => handler.read_u32(reader)? as u64,
            _ => handler.read_u64(reader)?,
        };
        values.push(value);
    }
    Ok(values)
}
