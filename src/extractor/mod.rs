//! Crop extraction from decoded scans
//!
//! Two modes: paired-spot extraction driven by GPR geometry, and uniform
//! grid splitting for images without geometry.

mod region;
mod geometry;
mod adjust;
mod summary;
mod spot_extractor;
mod grid_splitter;
#[cfg(test)]
mod tests;

pub use adjust::ToneAdjustment;
pub use geometry::{order_pair, spot_rect};
pub use grid_splitter::{GridCell, GridSplitter};
pub use region::{CropRect, Region};
pub use spot_extractor::SpotExtractor;
pub use summary::{sanitize_file_name, ExtractionSummary};
