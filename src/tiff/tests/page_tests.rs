//! Tests for page decoding

use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian};
use image::Rgba;

use super::test_utils::{build_tiff, samples_to_bytes, TestPage};
use crate::errors::GprError;
use crate::tiff::page::allocate_page;
use crate::tiff::{PageDecoder, PageImage, TiffReader};
use crate::utils::logger::Logger;

fn decode_all(bytes: Vec<u8>) -> Result<Vec<PageImage>, GprError> {
    let logger = Logger::detached();
    let mut reader = TiffReader::new(&logger);
    let mut cursor = Cursor::new(bytes);
    let tiff = reader.read(&mut cursor)?;
    let decoder = PageDecoder::new(&reader, &tiff);
    (0..tiff.page_count()).map(|page| decoder.decode(&mut cursor, page)).collect()
}

fn gradient_rgb(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x * 10) as u8, (y * 20) as u8, ((x + y) * 3) as u8]);
        }
    }
    data
}

fn assert_gradient(image: &PageImage, width: u32, height: u32) {
    assert_eq!(image.dimensions(), (width, height));
    for y in 0..height {
        for x in 0..width {
            let expected = Rgba([
                (x * 10) as u16 * 257,
                (y * 20) as u16 * 257,
                ((x + y) * 3) as u16 * 257,
                u16::MAX,
            ]);
            assert_eq!(image.get_pixel(x, y), &expected, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_two_pages_decode_independently() {
    let first = TestPage::new(3, 2, 1, vec![0, 50, 100, 150, 200, 250]);
    let second = TestPage::new(2, 1, 1, vec![255, 0]);
    let pages = decode_all(build_tiff::<LittleEndian>(&[first, second], false)).unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].get_pixel(1, 0), &Rgba([50 * 257, 50 * 257, 50 * 257, u16::MAX]));
    assert_eq!(pages[0].get_pixel(2, 1), &Rgba([250 * 257, 250 * 257, 250 * 257, u16::MAX]));
    assert_eq!(pages[1].dimensions(), (2, 1));
    assert_eq!(pages[1].get_pixel(0, 0).0[0], u16::MAX);
}

#[test]
fn test_rgb_strips_with_every_compression() {
    for compression in [1u16, 8, 14, 32773, 32946, 50000] {
        let mut page = TestPage::new(7, 5, 3, gradient_rgb(7, 5));
        page.compression = compression;
        page.rows_per_strip = Some(2);

        let pages = decode_all(build_tiff::<LittleEndian>(&[page], false)).unwrap();
        assert_gradient(&pages[0], 7, 5);
    }
}

#[test]
fn test_tiled_page_with_partial_edge_tiles() {
    let mut page = TestPage::new(7, 5, 3, gradient_rgb(7, 5));
    page.tile = Some((4, 4));
    page.compression = 8;

    let pages = decode_all(build_tiff::<BigEndian>(&[page], true)).unwrap();
    assert_gradient(&pages[0], 7, 5);
}

#[test]
fn test_horizontal_predictor_8_bit() {
    let mut page = TestPage::new(7, 5, 3, gradient_rgb(7, 5));
    page.predictor = 2;
    page.compression = 8;
    page.rows_per_strip = Some(3);

    let pages = decode_all(build_tiff::<LittleEndian>(&[page], false)).unwrap();
    assert_gradient(&pages[0], 7, 5);
}

#[test]
fn test_sixteen_bit_rgba_big_endian_with_predictor() {
    let samples: Vec<u16> = vec![
        1000, 60000, 3, 65535, 900, 100, 40000, 0,
        65535, 0, 1, 2, 12345, 54321, 11111, 22222,
    ];
    let mut page = TestPage::new(2, 2, 4, samples_to_bytes::<BigEndian>(&samples));
    page.bits = 16;
    page.predictor = 2;

    let pages = decode_all(build_tiff::<BigEndian>(&[page], false)).unwrap();

    assert_eq!(pages[0].get_pixel(0, 0), &Rgba([1000, 60000, 3, 65535]));
    assert_eq!(pages[0].get_pixel(1, 0), &Rgba([900, 100, 40000, 0]));
    assert_eq!(pages[0].get_pixel(1, 1), &Rgba([12345, 54321, 11111, 22222]));
}

#[test]
fn test_white_is_zero_is_inverted() {
    let mut page = TestPage::new(2, 1, 1, vec![0, 255]);
    page.photometric = 0;

    let pages = decode_all(build_tiff::<LittleEndian>(&[page], false)).unwrap();

    assert_eq!(pages[0].get_pixel(0, 0), &Rgba([u16::MAX, u16::MAX, u16::MAX, u16::MAX]));
    assert_eq!(pages[0].get_pixel(1, 0), &Rgba([0, 0, 0, u16::MAX]));
}

#[test]
fn test_gray_alpha() {
    let page = TestPage::new(1, 1, 2, vec![10, 0]);
    let pages = decode_all(build_tiff::<LittleEndian>(&[page], false)).unwrap();
    assert_eq!(pages[0].get_pixel(0, 0), &Rgba([2570, 2570, 2570, 0]));
}

#[test]
fn test_missing_page_is_an_error() {
    let bytes = build_tiff::<LittleEndian>(&[TestPage::new(1, 1, 1, vec![0])], false);
    let logger = Logger::detached();
    let mut reader = TiffReader::new(&logger);
    let mut cursor = Cursor::new(bytes);
    let tiff = reader.read(&mut cursor).unwrap();
    let decoder = PageDecoder::new(&reader, &tiff);

    assert!(matches!(decoder.decode(&mut cursor, 1), Err(GprError::InvalidTiff(_))));
}

#[test]
fn test_truncated_strip_is_an_error() {
    let mut bytes = build_tiff::<LittleEndian>(&[TestPage::new(4, 4, 3, gradient_rgb(4, 4))], false);
    // Shrink the strip byte count so the decoded strip comes up short
    let count_entry = find_entry(&bytes, 279);
    bytes[count_entry + 8] = 5;
    bytes[count_entry + 9] = 0;

    assert!(matches!(decode_all(bytes), Err(GprError::InvalidTiff(_))));
}

#[test]
fn test_oversized_page_fails_without_allocating() {
    assert!(matches!(allocate_page(u32::MAX, u32::MAX), Err(GprError::InvalidTiff(_))));
    assert_eq!(allocate_page(3, 2).unwrap().dimensions(), (3, 2));

    let mut bytes = build_tiff::<LittleEndian>(&[TestPage::new(1, 1, 1, vec![0])], false);
    for tag in [256, 257] {
        let entry = find_entry(&bytes, tag);
        bytes[entry + 8..entry + 12].copy_from_slice(&u32::MAX.to_le_bytes());
    }

    assert!(matches!(decode_all(bytes), Err(GprError::InvalidTiff(_))));
}

/// Offset of the classic little-endian IFD entry for `tag`
fn find_entry(bytes: &[u8], tag: u16) -> usize {
    let ifd = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
    let count = u16::from_le_bytes([bytes[ifd], bytes[ifd + 1]]) as usize;
    (0..count)
        .map(|i| ifd + 2 + i * 12)
        .find(|&pos| u16::from_le_bytes([bytes[pos], bytes[pos + 1]]) == tag)
        .unwrap()
}
