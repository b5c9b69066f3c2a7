//! Tests for airport feed parsing

use super::*;
use crate::Error;
use crate::app::services::airport_registry::{parse_airport_feed, parse_airport_feed_reader};
use tempfile::TempDir;

#[test]
fn test_parse_feed_skips_bad_rows() {
    let (airports, stats) = parse_airport_feed_reader(SAMPLE_FEED.as_bytes(), "sample").unwrap();

    let codes: Vec<&str> = airports.iter().map(|a| a.code()).collect();
    assert_eq!(codes, vec!["BOS", "JFK", "LGA"]);

    assert_eq!(stats.rows_read, 6);
    assert_eq!(stats.airports_parsed, 3);
    assert_eq!(stats.rows_skipped, 3);
    assert_eq!(stats.errors.len(), 3);
    assert!(stats.has_errors());
    assert!((stats.skip_rate() - 50.0).abs() < f64::EPSILON);
}

#[test]
fn test_parse_feed_reads_quoted_coordinates() {
    let feed = r#"1,"Logan","Boston","US","BOS","KBOS","42.364347","-71.005181",19"#;
    let (airports, _) = parse_airport_feed_reader(feed.as_bytes(), "quoted").unwrap();

    assert_eq!(airports.len(), 1);
    assert_eq!(airports[0].location(), (42.364347, -71.005181));
}

#[test]
fn test_parse_feed_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_feed_file(temp_dir.path(), "airports.dat", SAMPLE_FEED).unwrap();

    let (airports, stats) = parse_airport_feed(&path).unwrap();
    assert_eq!(airports.len(), 3);
    assert!(stats.summary().contains("parsed 3 airports"));
}

#[test]
fn test_empty_feed_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_test_feed_file(temp_dir.path(), "empty.dat", "").unwrap();

    assert!(matches!(
        parse_airport_feed(&path),
        Err(Error::FeedParsing { .. })
    ));
}

#[test]
fn test_missing_feed_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.dat");

    assert!(matches!(parse_airport_feed(&path), Err(Error::Io { .. })));
}
