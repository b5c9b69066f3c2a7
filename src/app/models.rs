//! Data models for the airport weather service
//!
//! This module contains the core data structures: airports with fixed
//! coordinates, summarised readings (data points), the per-airport
//! atmospheric record and the outcome of submitting a reading.

use crate::constants::IATA_CODE_PATTERN;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

static IATA_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IATA_CODE_PATTERN).expect("IATA code pattern is a valid regex"));

// =============================================================================
// Airport
// =============================================================================

/// A known airport identified by its three letter IATA code
///
/// Airports are immutable once constructed: coordinates are validated at
/// creation and there is no way to change them afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Airport {
    /// Three letter IATA code - primary key for airport lookups
    iata: String,

    /// Latitude in decimal degrees
    latitude: f64,

    /// Longitude in decimal degrees
    longitude: f64,
}

impl Airport {
    /// Create a new Airport with validation
    pub fn new(iata: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        let airport = Self {
            iata: iata.into(),
            latitude,
            longitude,
        };

        airport.validate()?;
        Ok(airport)
    }

    /// Validate the code format and coordinate ranges
    pub fn validate(&self) -> Result<()> {
        if !IATA_CODE.is_match(&self.iata) {
            return Err(Error::invalid_airport(format!(
                "Invalid IATA code '{}': must be three uppercase letters",
                self.iata
            )));
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::invalid_airport(format!(
                "Invalid latitude {}: must be between -90 and 90 degrees",
                self.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::invalid_airport(format!(
                "Invalid longitude {}: must be between -180 and 180 degrees",
                self.longitude
            )));
        }

        Ok(())
    }

    /// The IATA code
    pub fn code(&self) -> &str {
        &self.iata
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get airport location as (latitude, longitude) tuple
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.iata, self.latitude, self.longitude)
    }
}

// =============================================================================
// Data Point Types
// =============================================================================

/// The atmospheric variables a ground station can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataPointType {
    Wind,
    Temperature,
    Humidity,
    Pressure,
    CloudCover,
    Precipitation,
}

impl DataPointType {
    /// All data point types in reporting order
    pub const ALL: [DataPointType; 6] = [
        DataPointType::Wind,
        DataPointType::Temperature,
        DataPointType::Humidity,
        DataPointType::Pressure,
        DataPointType::CloudCover,
        DataPointType::Precipitation,
    ];

    /// Canonical upper-case name
    pub fn name(self) -> &'static str {
        match self {
            DataPointType::Wind => "WIND",
            DataPointType::Temperature => "TEMPERATURE",
            DataPointType::Humidity => "HUMIDITY",
            DataPointType::Pressure => "PRESSURE",
            DataPointType::CloudCover => "CLOUD_COVER",
            DataPointType::Precipitation => "PRECIPITATION",
        }
    }
}

impl fmt::Display for DataPointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataPointType {
    type Err = Error;

    /// Parse a point type name, ignoring case
    ///
    /// Accepts the legacy collector spellings `humidty` and `cloudcover`
    /// alongside the canonical names.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wind" => Ok(DataPointType::Wind),
            "temperature" => Ok(DataPointType::Temperature),
            "humidity" | "humidty" => Ok(DataPointType::Humidity),
            "pressure" => Ok(DataPointType::Pressure),
            "cloud_cover" | "cloudcover" => Ok(DataPointType::CloudCover),
            "precipitation" => Ok(DataPointType::Precipitation),
            _ => Err(Error::unknown_data_point_type(s)),
        }
    }
}

// =============================================================================
// Data Point (Reading)
// =============================================================================

/// A summarised observation for one atmospheric variable
///
/// `low`, `median` and `high` are the 1st, 2nd and 3rd quartiles of the
/// observation window. `mean` is the representative value used for
/// acceptance checks and display. On the wire the fields keep the collector
/// names `first`, `second`, `third`, `count` and `mean`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPoint {
    /// Mean of the observations
    pub mean: f64,

    /// 1st quartile, useful as a lower bound
    #[serde(rename = "first")]
    pub low: i32,

    /// 2nd quartile (median)
    #[serde(rename = "second")]
    pub median: i32,

    /// 3rd quartile, a less noisy upper value
    #[serde(rename = "third")]
    pub high: i32,

    /// Total number of measurements
    #[serde(rename = "count")]
    pub sample_count: i32,
}

impl DataPoint {
    pub fn new(low: i32, median: i32, high: i32, sample_count: i32, mean: f64) -> Self {
        Self {
            mean,
            low,
            median,
            high,
            sample_count,
        }
    }
}

// =============================================================================
// Atmospheric Information
// =============================================================================

/// The latest accepted reading of each data type for one airport
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtmosphericInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wind: Option<DataPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<DataPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    humidity: Option<DataPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pressure: Option<DataPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    cloud_cover: Option<DataPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    precipitation: Option<DataPoint>,

    /// Time of the most recent accepted write; zero millis on the wire when never updated
    #[serde(default, with = "millis_or_zero")]
    last_update_time: Option<DateTime<Utc>>,
}

impl AtmosphericInformation {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Current reading for a data type, if any
    pub fn reading(&self, data_type: DataPointType) -> Option<&DataPoint> {
        self.slot(data_type).as_ref()
    }

    /// Iterate over the data types that currently hold a reading
    pub fn readings(&self) -> impl Iterator<Item = (DataPointType, &DataPoint)> {
        DataPointType::ALL
            .into_iter()
            .filter_map(move |data_type| self.reading(data_type).map(|dp| (data_type, dp)))
    }

    /// Time of the most recent accepted write
    pub fn last_update_time(&self) -> Option<DateTime<Utc>> {
        self.last_update_time
    }

    /// True when at least one data type slot holds a reading
    pub fn is_populated(&self) -> bool {
        DataPointType::ALL
            .into_iter()
            .any(|data_type| self.slot(data_type).is_some())
    }

    /// True when populated and last updated strictly within `window` before `now`
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        if !self.is_populated() {
            return false;
        }

        let Some(last_update) = self.last_update_time else {
            return false;
        };

        match chrono::Duration::from_std(window) {
            Ok(window) => now.signed_duration_since(last_update) < window,
            // A window too large to represent covers every past update
            Err(_) => true,
        }
    }

    /// Overwrite the reading for a data type and stamp the update time
    pub(crate) fn set_reading(
        &mut self,
        data_type: DataPointType,
        data_point: DataPoint,
        at: DateTime<Utc>,
    ) {
        *self.slot_mut(data_type) = Some(data_point);
        self.last_update_time = Some(at);
    }

    fn slot(&self, data_type: DataPointType) -> &Option<DataPoint> {
        match data_type {
            DataPointType::Wind => &self.wind,
            DataPointType::Temperature => &self.temperature,
            DataPointType::Humidity => &self.humidity,
            DataPointType::Pressure => &self.pressure,
            DataPointType::CloudCover => &self.cloud_cover,
            DataPointType::Precipitation => &self.precipitation,
        }
    }

    fn slot_mut(&mut self, data_type: DataPointType) -> &mut Option<DataPoint> {
        match data_type {
            DataPointType::Wind => &mut self.wind,
            DataPointType::Temperature => &mut self.temperature,
            DataPointType::Humidity => &mut self.humidity,
            DataPointType::Pressure => &mut self.pressure,
            DataPointType::CloudCover => &mut self.cloud_cover,
            DataPointType::Precipitation => &mut self.precipitation,
        }
    }
}

/// Serialises an optional timestamp as epoch milliseconds, with 0 for `None`
mod millis_or_zero {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(value.map_or(0, |time| time.timestamp_millis()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        if millis == 0 {
            return Ok(None);
        }
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {millis}")))
    }
}

// =============================================================================
// Update Outcome
// =============================================================================

/// Result of submitting a reading that passed airport resolution
///
/// Rejection is a normal outcome, not an error: the stored record is left
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// The reading replaced the previous one for its data type
    Accepted,
    /// The mean value fell outside the acceptance range for its data type
    Rejected { data_type: DataPointType, mean: f64 },
}

impl UpdateOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, UpdateOutcome::Accepted)
    }
}
