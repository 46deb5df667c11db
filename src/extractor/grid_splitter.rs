//! Uniform grid splitting
//!
//! Used when no GPR geometry is available: the image minus its borders is
//! cut into equal cells, each saved under its 1-based column and row.

use image::{imageops, DynamicImage, RgbaImage};
use log::{debug, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::GridLayout;
use crate::errors::{GprError, GprResult};
use crate::tiff::{PageDecoder, TiffReader};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;
use crate::utils::write_utils::write_png_atomic;

use super::region::CropRect;
use super::summary::{sanitize_file_name, ExtractionSummary};

/// One grid cell, 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub column: u32,
    pub row: u32,
    pub rect: CropRect,
}

impl GridCell {
    /// File name `<stem>_<col>_<row>.png` with 1-based indices
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}_{}_{}.png", stem, self.column + 1, self.row + 1)
    }
}

pub struct GridSplitter<'a> {
    logger: &'a Logger,
    layout: GridLayout,
}

impl<'a> GridSplitter<'a> {
    pub fn new(logger: &'a Logger, layout: GridLayout) -> Self {
        GridSplitter { logger, layout }
    }

    /// Number of columns and rows for an image size
    ///
    /// `(extent - border_a - border_b) / (cell + 2 * padding) + 1` per axis;
    /// an image smaller than its borders has no cells.
    pub fn grid_size(&self, width: u32, height: u32) -> (u32, u32) {
        let l = &self.layout;
        let count = |extent: u32, a: u32, b: u32, cell: u32| -> u32 {
            let usable = extent as i64 - a as i64 - b as i64;
            if usable < 0 {
                0
            } else {
                (usable / (cell as i64 + 2 * l.padding as i64)) as u32 + 1
            }
        };
        (
            count(width, l.left, l.right, l.cell_width),
            count(height, l.top, l.bottom, l.cell_height),
        )
    }

    /// All cells of the grid, column-major
    pub fn cells(&self, width: u32, height: u32) -> Vec<GridCell> {
        let l = &self.layout;
        let (columns, rows) = self.grid_size(width, height);
        let (w, h, p) = (l.cell_width as i64, l.cell_height as i64, l.padding as i64);

        let mut cells = Vec::with_capacity((columns * rows) as usize);
        for column in 0..columns {
            for row in 0..rows {
                let (i, j) = (column as i64, row as i64);
                let rect = CropRect::new(
                    i * w + l.left as i64 + p,
                    j * h + l.top as i64 + p,
                    i * w + w + l.right as i64,
                    j * h + h + l.top as i64,
                );
                cells.push(GridCell { column, row, rect });
            }
        }
        cells
    }

    /// Splits an in-memory image into `<out_dir>/<stem>_<col>_<row>.png`
    ///
    /// Cells whose top-left pixel is fully transparent carry no data and are
    /// skipped, as are cells that fall outside the image.
    pub fn split(&self, image: &RgbaImage, stem: &str, out_dir: &Path, progress: &ProgressTracker) -> GprResult<ExtractionSummary> {
        let (width, height) = image.dimensions();
        let stem = sanitize_file_name(stem);
        let mut summary = ExtractionSummary::default();

        for cell in self.cells(width, height) {
            progress.increment(1);

            let region = match cell.rect.clamp_to(width, height) {
                Some(region) => region,
                None => {
                    warn!("Cell {},{} lies outside the {}x{} image", cell.column + 1, cell.row + 1, width, height);
                    summary.skipped += 1;
                    continue;
                }
            };

            if image.get_pixel(region.x, region.y).0[3] == 0 {
                debug!("Cell {},{} is transparent, skipping", cell.column + 1, cell.row + 1);
                summary.skipped += 1;
                continue;
            }

            let crop = imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image();
            write_png_atomic(&out_dir.join(cell.file_name(&stem)), &DynamicImage::ImageRgba8(crop))?;
            summary.written += 1;
        }

        Ok(summary)
    }

    /// Loads an image file and splits it into `<out_dir>/<stem>/`
    ///
    /// TIFF input uses page 0 of the scan decoder; every other format goes
    /// through the `image` crate.
    pub fn split_file<P: AsRef<Path>>(&self, path: P, out_dir: &Path, progress: &ProgressTracker) -> GprResult<ExtractionSummary> {
        let path = path.as_ref();
        let stem = path.file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| GprError::FormatError(format!("no file name in {}", path.display())))?;

        let image = self.load_image(path)?;
        let (columns, rows) = self.grid_size(image.width(), image.height());
        info!("Splitting {} ({}x{}) into {}x{} cells", path.display(), image.width(), image.height(), columns, rows);
        progress.set_length(progress.position() + (columns * rows) as u64);

        let target = out_dir.join(sanitize_file_name(stem));
        let summary = self.split(&image, stem, &target, progress)?;

        self.logger.log_summary(&path.display().to_string(), &[
            ("grid", format!("{}x{}", columns, rows)),
            ("written", summary.written.to_string()),
            ("skipped", summary.skipped.to_string()),
        ])?;
        Ok(summary)
    }

    fn load_image(&self, path: &Path) -> GprResult<RgbaImage> {
        let is_tiff = path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"))
            .unwrap_or(false);

        if is_tiff {
            let file = File::open(path)?;
            let mut reader = BufReader::new(file);
            let mut tiff_reader = TiffReader::new(self.logger);
            let tiff = tiff_reader.read(&mut reader)?;
            let page = PageDecoder::new(&tiff_reader, &tiff).decode(&mut reader, 0)?;
            Ok(DynamicImage::ImageRgba16(page).to_rgba8())
        } else {
            Ok(image::open(path)?.to_rgba8())
        }
    }
}
