//! Tone adjustment applied to every crop

use image::{imageops, RgbaImage};

use crate::settings::ToneSettings;

/// Gamma correction plus optional scanner brightness/contrast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneAdjustment {
    pub gamma: f64,
    pub settings: Option<ToneSettings>,
}

impl ToneAdjustment {
    pub fn new(gamma: f64, settings: Option<ToneSettings>) -> Self {
        ToneAdjustment { gamma, settings }
    }

    /// Lookup table mapping `v` to `255 * (v / 255)^(1 / gamma)`
    pub fn gamma_table(&self) -> [u8; 256] {
        let exponent = 1.0 / self.gamma.max(1e-5);
        let mut table = [0u8; 256];
        for (value, slot) in table.iter_mut().enumerate() {
            let corrected = (value as f64 / 255.0).powf(exponent) * 255.0;
            *slot = corrected.round().clamp(0.0, 255.0) as u8;
        }
        table
    }

    /// Applies gamma, then brightness, then contrast; alpha is kept
    pub fn apply(&self, image: RgbaImage) -> RgbaImage {
        let table = self.gamma_table();
        let mut image = image;
        for pixel in image.pixels_mut() {
            for sample in pixel.0.iter_mut().take(3) {
                *sample = table[*sample as usize];
            }
        }

        match self.settings {
            Some(tone) => {
                let brightened = if tone.brightness != 0 {
                    imageops::brighten(&image, tone.brightness)
                } else {
                    image
                };
                if tone.contrast != 0.0 {
                    imageops::contrast(&brightened, tone.contrast)
                } else {
                    brightened
                }
            }
            None => image,
        }
    }
}
