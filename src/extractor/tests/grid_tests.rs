use byteorder::LittleEndian;
use image::{Rgba, RgbaImage};

use super::scratch_dir;
use crate::config::{ExtractionConfig, GridLayout};
use crate::extractor::{CropRect, GridSplitter};
use crate::tiff::tests::test_utils::{build_tiff, TestPage};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

fn small_layout() -> GridLayout {
    GridLayout {
        cell_width: 10,
        cell_height: 5,
        padding: 1,
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    }
}

fn opaque(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 100, 255]))
}

#[test]
fn test_grid_size_default_layout() {
    let logger = Logger::detached();
    let splitter = GridSplitter::new(&logger, ExtractionConfig::default().grid);

    // (327 - 15 - 8) / 152 + 1 and (100 - 9 - 14) / 74 + 1
    assert_eq!(splitter.grid_size(327, 100), (3, 2));
    assert_eq!(splitter.grid_size(20, 20), (0, 0));
}

#[test]
fn test_cells_are_column_major() {
    let logger = Logger::detached();
    let splitter = GridSplitter::new(&logger, small_layout());

    let cells = splitter.cells(30, 10);
    assert_eq!(cells.len(), 6);

    let order: Vec<(u32, u32)> = cells.iter().map(|c| (c.column, c.row)).collect();
    assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);

    assert_eq!(cells[0].rect, CropRect::new(1, 1, 10, 5));
    assert_eq!(cells[5].rect, CropRect::new(21, 6, 30, 10));
}

#[test]
fn test_cell_rect_uses_borders() {
    let logger = Logger::detached();
    let splitter = GridSplitter::new(&logger, ExtractionConfig::default().grid);

    let cells = splitter.cells(327, 100);
    let second_column = cells.iter().find(|c| c.column == 1 && c.row == 1).unwrap();
    // x1 = 150 + 15 + 1, y1 = 72 + 9 + 1, x2 = 300 + 8, y2 = 144 + 9
    assert_eq!(second_column.rect, CropRect::new(166, 82, 308, 153));
}

#[test]
fn test_file_names_are_one_based() {
    let logger = Logger::detached();
    let splitter = GridSplitter::new(&logger, small_layout());

    let cells = splitter.cells(30, 10);
    assert_eq!(cells[0].file_name("slide"), "slide_1_1.png");
    assert_eq!(cells[5].file_name("slide"), "slide_3_2.png");
}

#[test]
fn test_split_skips_transparent_cells() {
    let _ = env_logger::builder().is_test(true).try_init();
    let logger = Logger::detached();
    let splitter = GridSplitter::new(&logger, small_layout());
    let out = scratch_dir("split_transparent");

    let mut image = opaque(30, 10);
    image.put_pixel(21, 6, Rgba([0, 0, 0, 0]));

    let progress = ProgressTracker::hidden();
    let summary = splitter.split(&image, "slide", &out, &progress).unwrap();

    assert_eq!(summary.written, 5);
    assert_eq!(summary.skipped, 1);
    assert_eq!(progress.position(), 6);
    assert!(out.join("slide_1_1.png").exists());
    assert!(out.join("slide_3_1.png").exists());
    assert!(!out.join("slide_3_2.png").exists());

    let cell = image::open(out.join("slide_2_1.png")).unwrap().to_rgba8();
    assert_eq!(cell.dimensions(), (9, 4));
    assert_eq!(cell.get_pixel(0, 0), &Rgba([11, 1, 100, 255]));
}

#[test]
fn test_split_png_file() {
    let logger = Logger::detached();
    let splitter = GridSplitter::new(&logger, small_layout());
    let dir = scratch_dir("split_png");
    let input = dir.join("scan.png");
    opaque(30, 10).save(&input).unwrap();

    let summary = splitter.split_file(&input, &dir, &ProgressTracker::hidden()).unwrap();

    assert_eq!(summary.written, 6);
    assert!(dir.join("scan").join("scan_2_2.png").exists());
}

#[test]
fn test_split_tiff_file() {
    let logger = Logger::detached();
    let splitter = GridSplitter::new(&logger, small_layout());
    let dir = scratch_dir("split_tiff");
    let input = dir.join("scan.tif");

    let data: Vec<u8> = (0..30 * 10).map(|i| (i % 250) as u8 + 1).collect();
    let page = TestPage::new(30, 10, 1, data);
    std::fs::write(&input, build_tiff::<LittleEndian>(&[page], false)).unwrap();

    let summary = splitter.split_file(&input, &dir, &ProgressTracker::hidden()).unwrap();

    assert_eq!(summary.written, 6);
    let cell = image::open(dir.join("scan").join("scan_1_1.png")).unwrap().to_rgba8();
    // Gray sample at (1, 1) is 31 + 1
    assert_eq!(cell.get_pixel(0, 0), &Rgba([32, 32, 32, 255]));
}

#[test]
fn test_split_missing_file() {
    let logger = Logger::detached();
    let splitter = GridSplitter::new(&logger, small_layout());
    let dir = scratch_dir("split_missing");

    assert!(splitter.split_file(dir.join("absent.png"), &dir, &ProgressTracker::hidden()).is_err());
}
