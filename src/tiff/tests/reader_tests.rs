//! Tests for TIFF structure reading

use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use super::test_utils::{build_tiff, TestPage};
use crate::errors::GprError;
use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::tags;
use crate::tiff::{IFDEntry, TiffReader, IFD};
use crate::utils::logger::Logger;

fn gray_page(width: u32, height: u32) -> TestPage {
    TestPage::new(width, height, 1, vec![0; (width * height) as usize])
}

#[test]
fn test_reads_two_page_classic_little_endian() {
    let bytes = build_tiff::<LittleEndian>(&[gray_page(800, 600), gray_page(4, 3)], false);
    let logger = Logger::detached();
    let mut reader = TiffReader::new(&logger);

    let tiff = reader.read(&mut Cursor::new(bytes)).unwrap();

    assert!(!tiff.is_big_tiff);
    assert_eq!(tiff.byte_order, ByteOrder::LittleEndian);
    assert_eq!(tiff.page_count(), 2);
    assert_eq!(tiff.ifds[0].get_entry(tags::IMAGE_WIDTH).unwrap().value_offset, 800);
    assert_eq!(tiff.ifds[1].number, 1);
}

#[test]
fn test_reads_bigtiff_big_endian() {
    let bytes = build_tiff::<BigEndian>(&[gray_page(1024, 768)], true);
    let logger = Logger::detached();
    let mut reader = TiffReader::new(&logger);
    let mut cursor = Cursor::new(bytes);

    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = &tiff.ifds[0];

    assert!(tiff.is_big_tiff);
    assert_eq!(tiff.byte_order, ByteOrder::BigEndian);
    assert_eq!(reader.read_tag_or(&mut cursor, ifd, tags::IMAGE_LENGTH, 0).unwrap(), 768);
}

#[test]
fn test_inline_short_array_in_big_endian() {
    // Two SHORT values share the 4-byte value field
    let page = TestPage::new(2, 2, 2, vec![0; 8]);
    let bytes = build_tiff::<BigEndian>(&[page], false);
    let logger = Logger::detached();
    let mut reader = TiffReader::new(&logger);
    let mut cursor = Cursor::new(bytes);

    let tiff = reader.read(&mut cursor).unwrap();
    let bits = reader.read_tag_values(&mut cursor, &tiff.ifds[0], tags::BITS_PER_SAMPLE).unwrap();

    assert_eq!(bits, vec![8, 8]);
}

#[test]
fn test_overflowing_value_count_is_invalid() {
    let entry = IFDEntry::new(tags::STRIP_OFFSETS, 16, u64::MAX / 4, 16, [0; 8]);
    assert!(matches!(entry.payload_size(), Err(GprError::InvalidTiff(_))));
    assert!(!entry.is_value_inline(true));

    let bytes = build_tiff::<LittleEndian>(&[gray_page(2, 2)], true);
    let logger = Logger::detached();
    let mut reader = TiffReader::new(&logger);
    let mut cursor = Cursor::new(bytes);
    reader.read(&mut cursor).unwrap();

    let mut ifd = IFD::new(0, 16);
    ifd.add_entry(entry);
    let result = reader.read_tag_values(&mut cursor, &ifd, tags::STRIP_OFFSETS);
    assert!(matches!(result, Err(GprError::InvalidTiff(_))));
}

#[test]
fn test_missing_tag() {
    let bytes = build_tiff::<LittleEndian>(&[gray_page(2, 2)], false);
    let logger = Logger::detached();
    let mut reader = TiffReader::new(&logger);
    let mut cursor = Cursor::new(bytes);
    let tiff = reader.read(&mut cursor).unwrap();

    let result = reader.read_tag_values(&mut cursor, &tiff.ifds[0], tags::TILE_WIDTH);
    assert!(matches!(result, Err(GprError::TagNotFound(322))));
    assert_eq!(reader.read_tag_or(&mut cursor, &tiff.ifds[0], tags::PREDICTOR, 1).unwrap(), 1);
}

#[test]
fn test_rejects_bad_header() {
    let logger = Logger::detached();

    let mut bad_version = Vec::new();
    bad_version.extend_from_slice(b"II");
    bad_version.write_u16::<LittleEndian>(41).unwrap();
    bad_version.write_u32::<LittleEndian>(8).unwrap();
    let result = TiffReader::new(&logger).read(&mut Cursor::new(bad_version));
    assert!(matches!(result, Err(GprError::InvalidTiff(_))));

    let mut bad_offset = Vec::new();
    bad_offset.extend_from_slice(b"II");
    bad_offset.write_u16::<LittleEndian>(42).unwrap();
    bad_offset.write_u32::<LittleEndian>(5000).unwrap();
    let result = TiffReader::new(&logger).read(&mut Cursor::new(bad_offset));
    assert!(matches!(result, Err(GprError::InvalidTiff(_))));

    let result = TiffReader::new(&logger).read(&mut Cursor::new(b"GIF89a".to_vec()));
    assert!(result.is_err());
}

#[test]
fn test_ifd_cycle_terminates() {
    // Header, then one IFD with zero entries whose next pointer is itself
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"II");
    bytes.write_u16::<LittleEndian>(42).unwrap();
    bytes.write_u32::<LittleEndian>(8).unwrap();
    bytes.write_u16::<LittleEndian>(0).unwrap();
    bytes.write_u32::<LittleEndian>(8).unwrap();

    let logger = Logger::detached();
    let tiff = TiffReader::new(&logger).read(&mut Cursor::new(bytes)).unwrap();

    assert_eq!(tiff.page_count(), 1);
}
