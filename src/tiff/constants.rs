//! TIFF format constants
//!
//! Only the tags and codes needed to decode scanner pages are listed.

/// TIFF header constants
pub mod header {
    /// Classic TIFF version number
    pub const TIFF_VERSION: u16 = 42;

    /// BigTIFF version number
    pub const BIG_TIFF_VERSION: u16 = 43;

    /// BigTIFF offset size in bytes
    pub const BIGTIFF_OFFSET_SIZE: u16 = 8;

    /// "II" byte order marker, read as a little-endian u16
    pub const LITTLE_ENDIAN_MARKER: u16 = 0x4949;

    /// "MM" byte order marker, read as a little-endian u16
    pub const BIG_ENDIAN_MARKER: u16 = 0x4D4D;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
    pub const IFD: u16 = 13;       // 32-bit IFD offset
    pub const LONG8: u16 = 16;     // BigTIFF 64-bit unsigned integer
    pub const SLONG8: u16 = 17;    // BigTIFF 64-bit signed integer
    pub const IFD8: u16 = 18;      // BigTIFF 64-bit IFD offset
}

/// Tags read by the page decoder
pub mod tags {
    pub const IMAGE_WIDTH: u16 = 256;
    pub const IMAGE_LENGTH: u16 = 257;
    pub const BITS_PER_SAMPLE: u16 = 258;
    pub const COMPRESSION: u16 = 259;
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 262;
    pub const STRIP_OFFSETS: u16 = 273;
    pub const SAMPLES_PER_PIXEL: u16 = 277;
    pub const ROWS_PER_STRIP: u16 = 278;
    pub const STRIP_BYTE_COUNTS: u16 = 279;
    pub const PLANAR_CONFIGURATION: u16 = 284;
    pub const PREDICTOR: u16 = 317;
    pub const TILE_WIDTH: u16 = 322;
    pub const TILE_LENGTH: u16 = 323;
    pub const TILE_OFFSETS: u16 = 324;
    pub const TILE_BYTE_COUNTS: u16 = 325;
    pub const EXTRA_SAMPLES: u16 = 338;
    pub const SAMPLE_FORMAT: u16 = 339;
}

/// Compression codes
pub mod compression {
    pub const NONE: u64 = 1;
    pub const ADOBE_DEFLATE: u64 = 8;
    pub const ZSTD: u64 = 14;
    pub const PACKBITS: u64 = 32773;
    pub const DEFLATE: u64 = 32946;
    pub const ZSTD_LEGACY: u64 = 50000;
}

/// Photometric interpretation values
pub mod photometric {
    pub const WHITE_IS_ZERO: u64 = 0;
    pub const BLACK_IS_ZERO: u64 = 1;
    pub const RGB: u64 = 2;
}

/// Predictor values
pub mod predictor {
    pub const NONE: u64 = 1;
    pub const HORIZONTAL: u64 = 2;
}

/// Planar configuration values
pub mod planar {
    pub const CHUNKY: u64 = 1;
    pub const SEPARATE: u64 = 2;
}

/// Sample format values
pub mod sample_format {
    pub const UNSIGNED: u64 = 1;
}

/// Upper bound on IFDs followed in one file
pub const MAX_IFD_CHAIN: usize = 1024;
