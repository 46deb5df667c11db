//! Decoding of one TIFF page into a 16-bit RGBA raster
//!
//! Supports strips and tiles in chunky layout, 8 or 16 unsigned bits per
//! sample, one to four samples per pixel and horizontal differencing.
//! Everything is widened to `Rgba<u16>` so the extractors see one pixel
//! type regardless of how the scanner stored the page.

use image::{ImageBuffer, Rgba};
use log::debug;
use std::io::SeekFrom;

use crate::compression::{CompressionFactory, CompressionHandler};
use crate::errors::{GprError, GprResult};
use crate::io::byte_order::ByteOrder;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{compression, photometric, planar, predictor, sample_format, tags};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;
use crate::tiff::types::TiffFile;

/// Decoded page raster
pub type PageImage = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Pixel layout of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: usize,
    pub bits_per_sample: usize,
    pub compression: u64,
    pub photometric: u64,
    pub predictor: u64,
    pub tiled: bool,
}

impl PageInfo {
    fn bytes_per_pixel(&self) -> usize {
        self.samples_per_pixel * self.bits_per_sample / 8
    }
}

/// Allocates a zeroed raster, failing instead of aborting when the declared
/// size cannot be held in memory
pub(crate) fn allocate_page(width: u32, height: u32) -> GprResult<PageImage> {
    let too_large = || GprError::InvalidTiff(format!("page size {}x{} is too large to decode", width, height));

    let len = (width as usize).checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(too_large)?;

    let mut samples: Vec<u16> = Vec::new();
    samples.try_reserve_exact(len).map_err(|_| too_large())?;
    samples.resize(len, 0);

    PageImage::from_raw(width, height, samples).ok_or_else(too_large)
}

/// Decodes pages of an already parsed TIFF file
pub struct PageDecoder<'a> {
    tiff_reader: &'a TiffReader<'a>,
    tiff: &'a TiffFile,
}

impl<'a> PageDecoder<'a> {
    pub fn new(tiff_reader: &'a TiffReader<'a>, tiff: &'a TiffFile) -> Self {
        PageDecoder { tiff_reader, tiff }
    }

    fn ifd(&self, page: usize) -> GprResult<&'a IFD> {
        self.tiff.page(page).ok_or_else(|| GprError::InvalidTiff(format!(
            "page {} requested but file has {} pages", page, self.tiff.page_count())))
    }

    /// Reads and validates the layout tags of a page
    pub fn page_info(&self, reader: &mut dyn SeekableReader, page: usize) -> GprResult<PageInfo> {
        let ifd = self.ifd(page)?;
        let tr = self.tiff_reader;

        let width = tr.read_tag_or(reader, ifd, tags::IMAGE_WIDTH, 0)?;
        let height = tr.read_tag_or(reader, ifd, tags::IMAGE_LENGTH, 0)?;
        if width == 0 || height == 0 || width > u32::MAX as u64 || height > u32::MAX as u64 {
            return Err(GprError::InvalidTiff(format!("page {} has invalid size {}x{}", page, width, height)));
        }

        let samples_per_pixel = tr.read_tag_or(reader, ifd, tags::SAMPLES_PER_PIXEL, 1)? as usize;
        if !(1..=4).contains(&samples_per_pixel) {
            return Err(GprError::InvalidTiff(format!("unsupported samples per pixel: {}", samples_per_pixel)));
        }

        let bits = if ifd.has_tag(tags::BITS_PER_SAMPLE) {
            tr.read_tag_values(reader, ifd, tags::BITS_PER_SAMPLE)?
        } else {
            vec![1]
        };
        let bits_per_sample = bits.first().copied().unwrap_or(1) as usize;
        if bits.iter().any(|&b| b as usize != bits_per_sample) || !matches!(bits_per_sample, 8 | 16) {
            return Err(GprError::InvalidTiff(format!("unsupported bits per sample: {:?}", bits)));
        }

        let format = tr.read_tag_or(reader, ifd, tags::SAMPLE_FORMAT, sample_format::UNSIGNED)?;
        if format != sample_format::UNSIGNED {
            return Err(GprError::InvalidTiff(format!("unsupported sample format: {}", format)));
        }

        let planar_config = tr.read_tag_or(reader, ifd, tags::PLANAR_CONFIGURATION, planar::CHUNKY)?;
        if planar_config == planar::SEPARATE && samples_per_pixel > 1 {
            return Err(GprError::InvalidTiff("planar (separate) sample layout is not supported".to_string()));
        }

        let compression = tr.read_tag_or(reader, ifd, tags::COMPRESSION, compression::NONE)?;
        if !CompressionFactory::is_supported(compression) {
            return Err(GprError::UnsupportedCompression(compression));
        }

        let default_photometric = if samples_per_pixel >= 3 { photometric::RGB } else { photometric::BLACK_IS_ZERO };
        let photometric = tr.read_tag_or(reader, ifd, tags::PHOTOMETRIC_INTERPRETATION, default_photometric)?;

        let predictor = tr.read_tag_or(reader, ifd, tags::PREDICTOR, predictor::NONE)?;
        if predictor != predictor::NONE && predictor != predictor::HORIZONTAL {
            return Err(GprError::InvalidTiff(format!("unsupported predictor: {}", predictor)));
        }

        Ok(PageInfo {
            width: width as u32,
            height: height as u32,
            samples_per_pixel,
            bits_per_sample,
            compression,
            photometric,
            predictor,
            tiled: ifd.is_tiled(),
        })
    }

    /// Decodes a page to a 16-bit RGBA raster
    pub fn decode(&self, reader: &mut dyn SeekableReader, page: usize) -> GprResult<PageImage> {
        let info = self.page_info(reader, page)?;
        let handler = CompressionFactory::create_handler(info.compression)?;
        debug!("Decoding page {}: {}x{}, {} samples x {} bits, {}, {}",
               page, info.width, info.height, info.samples_per_pixel, info.bits_per_sample,
               handler.name(), if info.tiled { "tiled" } else { "stripped" });

        let mut image = allocate_page(info.width, info.height)?;
        let ifd = self.ifd(page)?;

        if info.tiled {
            self.decode_tiles(reader, ifd, &info, handler.as_ref(), &mut image)?;
        } else {
            self.decode_strips(reader, ifd, &info, handler.as_ref(), &mut image)?;
        }

        Ok(image)
    }

    fn decode_strips(
        &self,
        reader: &mut dyn SeekableReader,
        ifd: &IFD,
        info: &PageInfo,
        handler: &dyn CompressionHandler,
        image: &mut PageImage,
    ) -> GprResult<()> {
        let tr = self.tiff_reader;
        let rows_per_strip = tr.read_tag_or(reader, ifd, tags::ROWS_PER_STRIP, info.height as u64)?
            .clamp(1, info.height as u64) as u32;
        let offsets = tr.read_tag_values(reader, ifd, tags::STRIP_OFFSETS)?;
        let byte_counts = tr.read_tag_values(reader, ifd, tags::STRIP_BYTE_COUNTS)?;

        let strip_count = info.height.div_ceil(rows_per_strip) as usize;
        if offsets.len() < strip_count || byte_counts.len() < strip_count {
            return Err(GprError::InvalidTiff(format!(
                "expected {} strips, found {} offsets and {} byte counts",
                strip_count, offsets.len(), byte_counts.len())));
        }

        for strip in 0..strip_count {
            let first_row = strip as u32 * rows_per_strip;
            let rows = rows_per_strip.min(info.height - first_row);
            let data = self.read_chunk(reader, offsets[strip], byte_counts[strip], handler,
                                       info, info.width, rows)?;
            let row_bytes = info.width as usize * info.bytes_per_pixel();

            for row in 0..rows {
                let start = row as usize * row_bytes;
                let line = &data[start..start + row_bytes];
                for x in 0..info.width {
                    let pixel = pixel_at(line, x as usize, info, self.tiff.byte_order);
                    image.put_pixel(x, first_row + row, pixel);
                }
            }
        }

        Ok(())
    }

    fn decode_tiles(
        &self,
        reader: &mut dyn SeekableReader,
        ifd: &IFD,
        info: &PageInfo,
        handler: &dyn CompressionHandler,
        image: &mut PageImage,
    ) -> GprResult<()> {
        let tr = self.tiff_reader;
        let tile_width = tr.read_tag_or(reader, ifd, tags::TILE_WIDTH, 0)?;
        let tile_height = tr.read_tag_or(reader, ifd, tags::TILE_LENGTH, 0)?;
        if tile_width == 0 || tile_height == 0 || tile_width > u32::MAX as u64 || tile_height > u32::MAX as u64 {
            return Err(GprError::InvalidTiff(format!("invalid tile size {}x{}", tile_width, tile_height)));
        }
        let (tile_width, tile_height) = (tile_width as u32, tile_height as u32);

        let offsets = tr.read_tag_values(reader, ifd, tags::TILE_OFFSETS)?;
        let byte_counts = tr.read_tag_values(reader, ifd, tags::TILE_BYTE_COUNTS)?;

        let tiles_across = info.width.div_ceil(tile_width);
        let tiles_down = info.height.div_ceil(tile_height);
        let tile_count = (tiles_across * tiles_down) as usize;
        if offsets.len() < tile_count || byte_counts.len() < tile_count {
            return Err(GprError::InvalidTiff(format!(
                "expected {} tiles, found {} offsets and {} byte counts",
                tile_count, offsets.len(), byte_counts.len())));
        }

        let row_bytes = tile_width as usize * info.bytes_per_pixel();

        for tile_y in 0..tiles_down {
            for tile_x in 0..tiles_across {
                let index = (tile_y * tiles_across + tile_x) as usize;
                let data = self.read_chunk(reader, offsets[index], byte_counts[index], handler,
                                           info, tile_width, tile_height)?;

                let origin_x = tile_x * tile_width;
                let origin_y = tile_y * tile_height;
                let visible_w = tile_width.min(info.width - origin_x);
                let visible_h = tile_height.min(info.height - origin_y);

                for row in 0..visible_h {
                    let start = row as usize * row_bytes;
                    let line = &data[start..start + row_bytes];
                    for x in 0..visible_w {
                        let pixel = pixel_at(line, x as usize, info, self.tiff.byte_order);
                        image.put_pixel(origin_x + x, origin_y + row, pixel);
                    }
                }
            }
        }

        Ok(())
    }

    /// Reads, decompresses and un-predicts one strip or tile
    #[allow(clippy::too_many_arguments)]
    fn read_chunk(
        &self,
        reader: &mut dyn SeekableReader,
        offset: u64,
        byte_count: u64,
        handler: &dyn CompressionHandler,
        info: &PageInfo,
        width: u32,
        rows: u32,
    ) -> GprResult<Vec<u8>> {
        let file_size = reader.seek(SeekFrom::End(0))?;
        if offset.checked_add(byte_count).map_or(true, |end| end > file_size) {
            return Err(GprError::InvalidTiff(format!(
                "pixel data at {}+{} extends past end of file", offset, byte_count)));
        }

        reader.seek(SeekFrom::Start(offset))?;
        let mut compressed = vec![0u8; byte_count as usize];
        reader.read_exact(&mut compressed)?;

        let mut data = handler.decompress(&compressed)?;
        let expected = width as usize * rows as usize * info.bytes_per_pixel();
        if data.len() < expected {
            return Err(GprError::InvalidTiff(format!(
                "decoded chunk has {} bytes, expected {}", data.len(), expected)));
        }
        data.truncate(expected);

        if info.predictor == predictor::HORIZONTAL {
            apply_horizontal_predictor(&mut data, width as usize, info, self.tiff.byte_order);
        }

        Ok(data)
    }
}

/// Undoes horizontal differencing in place, row by row
pub fn apply_horizontal_predictor(data: &mut [u8], width: usize, info: &PageInfo, byte_order: ByteOrder) {
    let samples = info.samples_per_pixel;
    let row_bytes = width * info.bytes_per_pixel();
    if row_bytes == 0 {
        return;
    }

    for row in data.chunks_mut(row_bytes) {
        if info.bits_per_sample == 8 {
            for i in samples..row.len() {
                row[i] = row[i].wrapping_add(row[i - samples]);
            }
        } else {
            let stride = samples * 2;
            let mut i = stride;
            while i + 1 < row.len() {
                let previous = byte_order.u16_from_bytes([row[i - stride], row[i - stride + 1]]);
                let current = byte_order.u16_from_bytes([row[i], row[i + 1]]);
                let [a, b] = byte_order.u16_to_bytes(current.wrapping_add(previous));
                row[i] = a;
                row[i + 1] = b;
                i += 2;
            }
        }
    }
}

/// Reads sample `index` of a pixel, widened to 16 bits
fn sample_at(line: &[u8], index: usize, bits: usize, byte_order: ByteOrder) -> u16 {
    if bits == 8 {
        line[index] as u16 * 257
    } else {
        byte_order.u16_from_bytes([line[index * 2], line[index * 2 + 1]])
    }
}

fn pixel_at(line: &[u8], x: usize, info: &PageInfo, byte_order: ByteOrder) -> Rgba<u16> {
    let spp = info.samples_per_pixel;
    let base = x * spp;
    let sample = |i: usize| sample_at(line, base + i, info.bits_per_sample, byte_order);

    match spp {
        1 | 2 => {
            let mut gray = sample(0);
            if info.photometric == photometric::WHITE_IS_ZERO {
                gray = u16::MAX - gray;
            }
            let alpha = if spp == 2 { sample(1) } else { u16::MAX };
            Rgba([gray, gray, gray, alpha])
        }
        3 => Rgba([sample(0), sample(1), sample(2), u16::MAX]),
        _ => Rgba([sample(0), sample(1), sample(2), sample(3)]),
    }
}
