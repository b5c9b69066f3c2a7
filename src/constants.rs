//! Application constants for the airport weather service
//!
//! This module contains physical constants, acceptance bounds, default
//! values and the starter airport set used throughout the service.

use std::time::Duration;

// =============================================================================
// Geodesy
// =============================================================================

/// Earth radius in kilometres used by the haversine distance
pub const EARTH_RADIUS_KM: f64 = 6372.8;

// =============================================================================
// Freshness and Health Reporting
// =============================================================================

/// Window within which a record's last update counts as fresh (24 hours)
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Largest radius assumed by the histogram before any radius has been queried
pub const DEFAULT_HISTOGRAM_MAX_RADIUS: f64 = 1000.0;

/// Number of modulus classes used when bucketing radius values
pub const RADIUS_HISTOGRAM_MODULUS: usize = 10;

/// Upper bound on the histogram length: half the Earth's circumference in km, plus one
pub const MAX_HISTOGRAM_LENGTH: usize = 20_038;

// =============================================================================
// Acceptance Ranges
// =============================================================================

/// Acceptance bounds applied to a reading's mean value, per data type.
///
/// Each pair is `(lower, upper)`; the lower bound is inclusive and the upper
/// bound exclusive.
pub mod acceptance {
    /// Wind speed: any non-negative mean
    pub const WIND: (f64, f64) = (0.0, f64::INFINITY);

    /// Temperature in degrees Celsius
    pub const TEMPERATURE: (f64, f64) = (-50.0, 100.0);

    /// Relative humidity percentage
    pub const HUMIDITY: (f64, f64) = (0.0, 100.0);

    /// Barometric pressure in mmHg
    pub const PRESSURE: (f64, f64) = (650.0, 800.0);

    /// Cloud cover percentage
    pub const CLOUD_COVER: (f64, f64) = (0.0, 100.0);

    /// Precipitation in centimetres
    pub const PRECIPITATION: (f64, f64) = (0.0, 100.0);
}

// =============================================================================
// Airports
// =============================================================================

/// Starter airports seeded by the bootstrap operation: (IATA, latitude, longitude)
pub const STARTER_AIRPORTS: &[(&str, f64, f64)] = &[
    ("BOS", 42.364347, -71.005181),
    ("EWR", 40.6925, -74.168667),
    ("JFK", 40.639751, -73.778925),
    ("LGA", 40.777245, -73.872608),
    ("MMU", 40.79935, -74.4148747),
];

/// Pattern an IATA code must match
pub const IATA_CODE_PATTERN: &str = "^[A-Z]{3}$";

/// Airport feed column holding the IATA code
pub const FEED_IATA_COLUMN: usize = 4;

/// Airport feed column holding the latitude
pub const FEED_LATITUDE_COLUMN: usize = 6;

/// Airport feed column holding the longitude
pub const FEED_LONGITUDE_COLUMN: usize = 7;

// =============================================================================
// Service Defaults
// =============================================================================

/// Default address the HTTP server binds to
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:9090";

/// Default base URL clients connect to
pub const DEFAULT_BASE_URL: &str = "http://localhost:9090";

/// Response body of the collector ping endpoint
pub const COLLECT_PING_RESPONSE: &str = "ready";

/// Application directory name under the user configuration directory
pub const CONFIG_DIR_NAME: &str = "airport-weather";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
