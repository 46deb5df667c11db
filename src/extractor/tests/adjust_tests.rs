use image::{Rgba, RgbaImage};

use crate::extractor::{sanitize_file_name, ExtractionSummary, ToneAdjustment};
use crate::settings::ToneSettings;

#[test]
fn test_unit_gamma_is_identity() {
    let table = ToneAdjustment::new(1.0, None).gamma_table();
    for (value, mapped) in table.iter().enumerate() {
        assert_eq!(*mapped as usize, value);
    }
}

#[test]
fn test_gamma_table_brightens_midtones() {
    let table = ToneAdjustment::new(2.0, None).gamma_table();
    assert_eq!(table[0], 0);
    assert_eq!(table[255], 255);
    assert_eq!(table[64], 128);

    let default_gamma = ToneAdjustment::new(1.5, None).gamma_table();
    assert!(default_gamma[128] > 128);
    assert!(default_gamma.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_apply_keeps_alpha() {
    let image = RgbaImage::from_pixel(2, 2, Rgba([64, 0, 255, 77]));
    let out = ToneAdjustment::new(2.0, None).apply(image);
    assert_eq!(out.get_pixel(1, 1), &Rgba([128, 0, 255, 77]));
}

#[test]
fn test_apply_brightness_after_gamma() {
    let settings = ToneSettings { brightness: 10, contrast: 0.0 };
    let image = RgbaImage::from_pixel(1, 1, Rgba([100, 0, 250, 255]));

    let out = ToneAdjustment::new(1.0, Some(settings)).apply(image);
    assert_eq!(out.get_pixel(0, 0), &Rgba([110, 10, 255, 255]));
}

#[test]
fn test_apply_contrast() {
    let settings = ToneSettings { brightness: 0, contrast: 50.0 };
    let image = RgbaImage::from_fn(2, 1, |x, _| if x == 0 { Rgba([40, 40, 40, 255]) } else { Rgba([220, 220, 220, 255]) });

    let out = ToneAdjustment::new(1.0, Some(settings)).apply(image);
    assert!(out.get_pixel(0, 0).0[0] < 40);
    assert!(out.get_pixel(1, 0).0[0] > 220);
}

#[test]
fn test_summary_merge_and_display() {
    let mut total = ExtractionSummary { written: 3, skipped: 1 };
    total.merge(ExtractionSummary { written: 2, skipped: 4 });
    assert_eq!(total, ExtractionSummary { written: 5, skipped: 5 });
    assert_eq!(total.to_string(), "5 written, 5 skipped");
}

#[test]
fn test_sanitize_file_name() {
    assert_eq!(sanitize_file_name("IgG2b"), "IgG2b");
    assert_eq!(sanitize_file_name("anti-IgG/IgM"), "anti-IgG_IgM");
    assert_eq!(sanitize_file_name(" a:b*c "), "a_b_c");
    assert_eq!(sanitize_file_name(".."), "_");
    assert_eq!(sanitize_file_name(""), "_");
}
