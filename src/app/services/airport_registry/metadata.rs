//! Airport feed loading statistics
//!
//! This module defines the statistics gathered while parsing an airport feed
//! and while uploading its airports to a running service.

use std::time::Duration;

/// Statistics about an airport feed load
#[derive(Debug, Clone, Default)]
pub struct FeedLoadStats {
    /// Number of rows read from the feed
    pub rows_read: usize,

    /// Number of rows that produced a valid airport
    pub airports_parsed: usize,

    /// Number of rows skipped (bad code, too few columns, bad coordinates)
    pub rows_skipped: usize,

    /// Number of airports accepted by the destination
    pub airports_loaded: usize,

    /// Time taken to load the feed
    pub load_duration: Duration,

    /// Any errors encountered during loading
    pub errors: Vec<String>,
}

impl FeedLoadStats {
    /// Create new empty load statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped row along with the reason
    pub fn skip(&mut self, message: String) {
        self.rows_skipped += 1;
        self.errors.push(message);
    }

    /// Calculate the skip rate as a percentage
    pub fn skip_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.rows_skipped as f64 / self.rows_read as f64) * 100.0
        }
    }

    /// Check if any errors occurred during loading
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Read {} rows, parsed {} airports, loaded {} ({:.1}% skipped) in {:.2}s",
            self.rows_read,
            self.airports_parsed,
            self.airports_loaded,
            self.skip_rate(),
            self.load_duration.as_secs_f64()
        )
    }
}
