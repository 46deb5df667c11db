//! File writing utilities
//!
//! Outputs are produced in memory, written to a sibling `.part` file and
//! renamed into place, so an interrupted run never leaves a truncated file
//! under the final name.

use std::ffi::OsString;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};

use crate::errors::GprResult;

const PARTIAL_SUFFIX: &str = ".part";

/// Path of the temporary file used while writing `path`
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    path.with_file_name(name)
}

/// Writes `data` to `path` through a temporary file and a rename
///
/// Parent directories are created as needed.
pub fn write_atomic(path: &Path, data: &[u8]) -> GprResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp = partial_path(path);
    let result = fs::File::create(&temp)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&temp, path));

    if let Err(e) = result {
        let _ = fs::remove_file(&temp);
        return Err(e.into());
    }
    Ok(())
}

/// Encodes an image as PNG in memory
pub fn encode_png(image: &DynamicImage) -> GprResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Encodes an image as PNG and writes it atomically
pub fn write_png_atomic(path: &Path, image: &DynamicImage) -> GprResult<()> {
    let encoded = encode_png(image)?;
    write_atomic(path, &encoded)
}
