//! Spot geometry to pixel rectangle mapping

use crate::gpr::SpotGeometry;

use super::region::CropRect;

/// Orders a spot pair so the first entry is the top-left reference spot
///
/// The pair is swapped only when the second spot lies strictly above and
/// to the left of the first; otherwise file order is kept.
pub fn order_pair(first: SpotGeometry, second: SpotGeometry) -> (SpotGeometry, SpotGeometry) {
    if second.x < first.x && second.y < first.y {
        (second, first)
    } else {
        (first, second)
    }
}

/// Unpadded pixel rectangle spanned by a spot pair
///
/// Scanner coordinates are divided by `scale` with truncating integer
/// division after extending each spot by its radius.
pub fn spot_rect(top_left: &SpotGeometry, bottom_right: &SpotGeometry, scale: i64) -> CropRect {
    let r0 = top_left.radius();
    let r1 = bottom_right.radius();

    CropRect::new(
        (top_left.x - r0) / scale,
        (top_left.y - r0) / scale,
        (bottom_right.x + r1) / scale,
        (bottom_right.y + r1) / scale,
    )
}
