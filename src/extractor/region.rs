//! Rectangles for crop extraction
//!
//! `CropRect` is computed from spot geometry in signed pixel coordinates and
//! may reach outside the page. `Region` is the clamped, non-empty rectangle
//! that is actually cut out.

use crate::config::Padding;

/// Region for image extraction (in pixel coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner
    pub x: u32,
    /// Y-coordinate of the top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }
}

/// Unclamped rectangle with exclusive bottom-right corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl CropRect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        CropRect { x1, y1, x2, y2 }
    }

    /// Grows the rectangle by the margin on every side
    pub fn padded(&self, padding: Padding) -> Self {
        CropRect {
            x1: self.x1 - padding.horizontal,
            y1: self.y1 - padding.vertical,
            x2: self.x2 + padding.horizontal,
            y2: self.y2 + padding.vertical,
        }
    }

    /// Whether the rectangle lies completely inside a `width` x `height` page
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x1 >= 0 && self.y1 >= 0 && self.x2 <= width as i64 && self.y2 <= height as i64
    }

    /// Intersects with the page bounds, `None` if nothing remains
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Region> {
        let x1 = self.x1.clamp(0, width as i64);
        let y1 = self.y1.clamp(0, height as i64);
        let x2 = self.x2.clamp(0, width as i64);
        let y2 = self.y2.clamp(0, height as i64);

        if x2 <= x1 || y2 <= y1 {
            return None;
        }

        Some(Region::new(x1 as u32, y1 as u32, (x2 - x1) as u32, (y2 - y1) as u32))
    }
}
