//! Scanner settings reader
//!
//! The scanner's settings file stores brightness and contrast as single
//! unsigned bytes at fixed offsets. They only tune how crops are rendered.

use byteorder::ReadBytesExt;
use log::debug;
use std::fs::File;
use std::io::SeekFrom;
use std::path::Path;

use crate::errors::GprResult;
use crate::io::seekable::SeekableReader;


/// Offset of the brightness byte
pub const BRIGHTNESS_OFFSET: u64 = 0x17C;

/// Offset of the contrast byte
pub const CONTRAST_OFFSET: u64 = 0x183;

/// Neutral value of both settings
const NEUTRAL: i32 = 128;

/// Brightness and contrast as stored by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    pub brightness: u8,
    pub contrast: u8,
}

/// Settings mapped onto image adjustments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSettings {
    /// Offset added to every colour sample
    pub brightness: i32,
    /// Contrast change in percent
    pub contrast: f32,
}

impl ScanSettings {
    /// Reads the settings file at `path`
    pub fn read<P: AsRef<Path>>(path: P) -> GprResult<Self> {
        let path = path.as_ref();
        debug!("Reading scanner settings from {}", path.display());
        let mut file = File::open(path)?;
        Self::from_reader(&mut file)
    }

    /// Reads both bytes from a seekable source
    ///
    /// A source shorter than the contrast offset fails with an unexpected
    /// end-of-file `IoError`.
    pub fn from_reader(reader: &mut dyn SeekableReader) -> GprResult<Self> {
        reader.seek(SeekFrom::Start(BRIGHTNESS_OFFSET))?;
        let brightness = reader.read_u8()?;
        reader.seek(SeekFrom::Start(CONTRAST_OFFSET))?;
        let contrast = reader.read_u8()?;

        Ok(ScanSettings { brightness, contrast })
    }

    pub fn tone(&self) -> ToneSettings {
        ToneSettings {
            brightness: self.brightness as i32 - NEUTRAL,
            contrast: (self.contrast as i32 - NEUTRAL) as f32 * 100.0 / NEUTRAL as f32,
        }
    }
}
