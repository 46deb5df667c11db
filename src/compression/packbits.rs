//! Handler for PackBits run-length encoded data

use crate::errors::{GprError, GprResult};
use super::handler::CompressionHandler;

/// PackBits handler (compression code 32773)
pub struct PackBitsHandler;

impl CompressionHandler for PackBitsHandler {
    fn decompress(&self, data: &[u8]) -> GprResult<Vec<u8>> {
        let mut out = Vec::with_capacity(data.len() * 2);
        let mut pos = 0;

        while pos < data.len() {
            let header = data[pos] as i8;
            pos += 1;

            match header {
                // no-op
                -128 => {}
                0..=127 => {
                    let literal = header as usize + 1;
                    let end = pos + literal;
                    if end > data.len() {
                        return Err(GprError::InvalidTiff("PackBits literal run past end of data".to_string()));
                    }
                    out.extend_from_slice(&data[pos..end]);
                    pos = end;
                }
                _ => {
                    let repeat = (1 - header as isize) as usize;
                    let value = *data.get(pos)
                        .ok_or_else(|| GprError::InvalidTiff("PackBits repeat run past end of data".to_string()))?;
                    pos += 1;
                    out.extend(std::iter::repeat(value).take(repeat));
                }
            }
        }

        Ok(out)
    }

    fn name(&self) -> &'static str {
        "PackBits"
    }

    fn code(&self) -> u64 {
        32773
    }
}
