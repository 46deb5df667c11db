//! Seekable reader trait
//!
//! Scan decoding and settings lookup both jump to absolute offsets, so they
//! take any reader that can also seek: files, cursors over test buffers.

use std::io::{Read, Seek};

/// Reader that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
