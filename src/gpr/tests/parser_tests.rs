use std::io::Cursor;

use super::test_utils::{gpr_document, RowFixture};
use crate::config::ParserConfig;
use crate::errors::GprError;
use crate::gpr::constants::columns;
use crate::gpr::parser::{clamp_snr, clamp_statistic, has_gpr_extension};
use crate::gpr::{GprReader, SkipCounts};
use crate::utils::logger::Logger;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn parse(document: &str) -> crate::errors::GprResult<crate::gpr::SpotSet> {
    let logger = Logger::detached();
    GprReader::new(&logger).parse(Cursor::new(document.as_bytes()), "test.gpr")
}

#[test]
fn test_parse_records_in_file_order() {
    init();
    let rows = vec![
        RowFixture::new("IgG").at(1200, 1400),
        RowFixture::new("IgA").at(2200, 2400),
        RowFixture::new("IgG").at(3200, 3400),
    ];
    let document = gpr_document(&rows.iter().map(RowFixture::to_line).collect::<Vec<_>>());

    let set = parse(&document).unwrap();

    assert_eq!(set.len(), 3);
    assert_eq!(set.source(), "test.gpr");
    for (record, row) in set.records().iter().zip(&rows) {
        assert_eq!(record, &row.to_record());
    }
    assert_eq!(set.skipped(), SkipCounts::default());
}

#[test]
fn test_medians_come_from_their_own_columns() {
    let line = RowFixture::new("IgM").to_line();
    let set = parse(&gpr_document(&[line])).unwrap();
    let record = &set.records()[0];

    assert_eq!(columns::A_MEDIAN, 8);
    assert_eq!(columns::B_MEDIAN, 20);
    assert_eq!(record.a_median_raw, 5000.0);
    assert_eq!(record.b_median_raw, 3000.0);
}

#[test]
fn test_negative_statistics_are_clamped() {
    let mut row = RowFixture::new("IgM").stats(-5.0, 12.0, -0.5, 0.0);
    row.a_snr = -1.0;
    row.b_snr = 2.5;

    let set = parse(&gpr_document(&[row.to_line()])).unwrap();
    let record = &set.records()[0];

    assert_eq!(record.a_median, 1.0);
    assert_eq!(record.b_median, 12.0);
    assert_eq!(record.a_mean, 1.0);
    assert_eq!(record.b_mean, 0.0);
    assert_eq!(record.a_snr, 0.0);
    assert_eq!(record.b_snr, 2.5);
}

#[test]
fn test_clamp_helpers() {
    assert_eq!(clamp_statistic(-0.01), 1.0);
    assert_eq!(clamp_statistic(0.0), 0.0);
    assert_eq!(clamp_statistic(42.5), 42.5);
    assert_eq!(clamp_snr(-3.0), 0.0);
    assert_eq!(clamp_snr(3.0), 3.0);
}

#[test]
fn test_reserved_rows_are_excluded() {
    let mut calibration = RowFixture::new("Cal");
    calibration.row = "17".to_string();
    let mut control = RowFixture::new("Ctrl");
    control.row = "18".to_string();
    let kept = RowFixture::new("IgA");

    let document = gpr_document(&[calibration.to_line(), kept.to_line(), control.to_line()]);
    let set = parse(&document).unwrap();

    assert_eq!(set.len(), 1);
    assert_eq!(set.records()[0].identifier, "IgA");
    assert_eq!(set.skipped().reserved, 2);
}

#[test]
fn test_blank_identifiers_are_excluded() {
    let document = gpr_document(&[
        RowFixture::new("Empty").to_line(),
        RowFixture::new("BLANK").to_line(),
        RowFixture::new("blank").to_line(),
        RowFixture::new("Blanket").to_line(),
    ]);
    let set = parse(&document).unwrap();

    assert_eq!(set.len(), 1);
    assert_eq!(set.records()[0].identifier, "Blanket");
    assert_eq!(set.skipped().blank, 3);
}

#[test]
fn test_short_row_is_skipped_and_file_succeeds() {
    let good = RowFixture::new("IgA").to_line();
    let fields: Vec<&str> = good.split('\t').collect();
    let short = fields[..55].join("\t");
    let long = format!("{}\textra", good);

    let document = gpr_document(&[short, good.clone(), long]);
    let set = parse(&document).unwrap();

    assert_eq!(set.len(), 1);
    assert_eq!(set.skipped().structural, 2);
    assert_eq!(set.skipped().total(), 2);
}

#[test]
fn test_unparseable_number_aborts_file() {
    let mut row = RowFixture::new("IgA").to_line().split('\t').map(String::from).collect::<Vec<_>>();
    row[columns::X] = "12a".to_string();

    let document = gpr_document(&[RowFixture::new("IgG").to_line(), row.join("\t")]);

    match parse(&document) {
        Err(GprError::ParseError { line, column, value }) => {
            assert_eq!(line, 35);
            assert_eq!(column, columns::X);
            assert_eq!(value, "12a");
        }
        other => panic!("expected ParseError, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_header_lines_are_not_data() {
    // A header alone parses to an empty set
    let set = parse(&gpr_document(&[])).unwrap();
    assert!(set.is_empty());

    // Blank lines do not count towards the header
    let mut document = String::from("\r\n\r\n");
    document.push_str(&gpr_document(&[RowFixture::new("IgA").to_line()]));
    assert_eq!(parse(&document).unwrap().len(), 1);
}

#[test]
fn test_quoted_fields_are_unquoted() {
    let mut fields: Vec<String> = RowFixture::new("x").to_line().split('\t').map(String::from).collect();
    fields[columns::ID] = "\"IgG \"\"2b\"\"\"".to_string();
    fields[columns::Y] = "\"1400\"".to_string();

    let set = parse(&gpr_document(&[fields.join("\t")])).unwrap();

    assert_eq!(set.records()[0].identifier, "IgG \"2b\"");
    assert_eq!(set.records()[0].y, 1400);
}

#[test]
fn test_quoted_identifier_may_hold_a_tab() {
    let mut fields: Vec<String> = RowFixture::new("x").to_line().split('\t').map(String::from).collect();
    fields[columns::ID] = "\"Ig\tG\"".to_string();

    let set = parse(&gpr_document(&[fields.join("\t"), RowFixture::new("IgA").to_line()])).unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(set.records()[0].identifier, "Ig\tG");
    assert_eq!(set.skipped().structural, 0);
}

#[test]
fn test_custom_layout() {
    let logger = Logger::detached();
    let config = ParserConfig {
        header_lines: 1,
        reserved_rows: vec![3],
        ..ParserConfig::default()
    };
    let document = format!("header\n{}\n", RowFixture::new("IgA").to_line());

    let set = GprReader::with_config(&logger, config)
        .parse(Cursor::new(document.as_bytes()), "custom")
        .unwrap();

    assert!(set.is_empty());
    assert_eq!(set.skipped().reserved, 1);
}

#[test]
fn test_read_rejects_wrong_extension() {
    let logger = Logger::detached();
    let path = std::env::temp_dir().join("gprkit_parser_wrong_ext.txt");
    std::fs::write(&path, gpr_document(&[])).unwrap();

    let result = GprReader::new(&logger).read(&path);
    assert!(matches!(result, Err(GprError::FormatError(_))));

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_read_from_file() {
    let logger = Logger::detached();
    let path = std::env::temp_dir().join("gprkit_parser_read.gpr");
    std::fs::write(&path, gpr_document(&[RowFixture::new("IgA").to_line()])).unwrap();

    let set = GprReader::new(&logger).read(&path).unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.source().ends_with("gprkit_parser_read.gpr"));

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_missing_file_is_io_error() {
    let logger = Logger::detached();
    let path = std::env::temp_dir().join("gprkit_parser_does_not_exist.gpr");

    assert!(matches!(GprReader::new(&logger).read(&path), Err(GprError::IoError(_))));
}

#[test]
fn test_extension_check() {
    use std::path::Path;
    assert!(has_gpr_extension(Path::new("/data/slide.gpr")));
    assert!(!has_gpr_extension(Path::new("/data/slide.GPR.txt")));
    assert!(!has_gpr_extension(Path::new("/data/slide")));
}
