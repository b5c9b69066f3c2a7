//! Shared test utilities and fixtures for airport registry tests

use std::fs;
use std::path::{Path, PathBuf};

pub mod loader_tests;

/// Feed rows in the airports.dat layout, including rows the loader must skip
pub const SAMPLE_FEED: &str = r#"3448,"General Edward Lawrence Logan Intl","Boston","United States","BOS","KBOS",42.364347,-71.005181,19,-5,"A"
3797,"John F Kennedy Intl","New York","United States","JFK","KJFK",40.639751,-73.778925,13,-5,"A"
3697,"La Guardia","New York","United States","LGA","KLGA",40.777245,-73.872608,22,-5,"A"
7767,"Hazy Airstrip","Nowhere","United States",\N,"KXXX",40.0,-73.0,10,-5,"A"
9999,"Broken Row","Nowhere","United States","BRK"
3494,"Newark Liberty Intl","Newark","United States","EWR","KEWR",not-a-number,-74.168667,18,-5,"A"
"#;

/// Write a feed file into `dir` and return its path
pub fn create_test_feed_file(dir: &Path, filename: &str, content: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(filename);
    fs::write(&path, content)?;
    Ok(path)
}
