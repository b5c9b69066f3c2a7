//! Airport feed parsing
//!
//! Reads the comma-delimited, double-quoted airport feed (the `airports.dat`
//! layout): no header row, IATA code in column 4, latitude in column 6 and
//! longitude in column 7. Rows that cannot produce a valid airport are
//! skipped and counted rather than aborting the load.

use super::metadata::FeedLoadStats;
use crate::app::models::Airport;
use crate::constants::{FEED_IATA_COLUMN, FEED_LATITUDE_COLUMN, FEED_LONGITUDE_COLUMN};
use crate::{Error, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Parse an airport feed file
///
/// # Errors
/// * Returns `Error::Io` if the file cannot be opened
/// * Returns `Error::FeedParsing` if the file holds no rows at all
pub fn parse_airport_feed(path: &Path) -> Result<(Vec<Airport>, FeedLoadStats)> {
    info!("Parsing airport feed: {}", path.display());

    let file = File::open(path).map_err(|e| {
        Error::io(
            format!("Failed to open airport feed {}", path.display()),
            e,
        )
    })?;

    parse_airport_feed_reader(file, &path.display().to_string())
}

/// Parse an airport feed from any reader; `source_name` is used in messages
pub fn parse_airport_feed_reader<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<(Vec<Airport>, FeedLoadStats)> {
    let start_time = Instant::now();
    let mut stats = FeedLoadStats::new();
    let mut airports = Vec::new();

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    for (index, record) in csv_reader.records().enumerate() {
        let line = index + 1;
        stats.rows_read += 1;

        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable row {} in {}: {}", line, source_name, e);
                stats.skip(format!("{}:{}: {}", source_name, line, e));
                continue;
            }
        };

        match parse_airport_record(&record) {
            Ok(airport) => {
                debug!("Parsed airport {} from row {}", airport, line);
                stats.airports_parsed += 1;
                airports.push(airport);
            }
            Err(e) => {
                warn!("Skipping row {} in {}: {}", line, source_name, e);
                stats.skip(format!("{}:{}: {}", source_name, line, e));
            }
        }
    }

    if stats.rows_read == 0 {
        return Err(Error::feed_parsing(source_name, "feed is empty", None));
    }

    stats.load_duration = start_time.elapsed();
    info!("Airport feed parsed: {}", stats.summary());

    Ok((airports, stats))
}

/// Build an airport from a single feed row
pub fn parse_airport_record(record: &StringRecord) -> Result<Airport> {
    let field = |column: usize, name: &str| {
        record.get(column).ok_or_else(|| {
            Error::invalid_airport(format!(
                "row has {} columns, missing {} (column {})",
                record.len(),
                name,
                column
            ))
        })
    };

    let code = field(FEED_IATA_COLUMN, "IATA code")?;
    let latitude = parse_coordinate(field(FEED_LATITUDE_COLUMN, "latitude")?, "latitude")?;
    let longitude = parse_coordinate(field(FEED_LONGITUDE_COLUMN, "longitude")?, "longitude")?;

    Airport::new(code, latitude, longitude)
}

fn parse_coordinate(value: &str, name: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| Error::invalid_airport(format!("{} '{}' is not a number", name, value)))
}
