//! Acceptance ranges for incoming readings
//!
//! Each data type has physically-motivated bounds on a reading's mean value.
//! A reading outside its range is discarded rather than stored. Lower bounds
//! are inclusive, upper bounds exclusive; NaN never passes.

use crate::app::models::{DataPoint, DataPointType};
use crate::constants::acceptance;

/// Half-open range `[lower, upper)` on a reading's mean value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptanceRange {
    pub lower: f64,
    pub upper: f64,
}

impl AcceptanceRange {
    const fn from_bounds((lower, upper): (f64, f64)) -> Self {
        Self { lower, upper }
    }

    /// Check whether a mean value falls inside the range
    pub fn contains(&self, mean: f64) -> bool {
        mean >= self.lower && mean < self.upper
    }
}

/// The acceptance range for a data type
pub fn acceptance_range(data_type: DataPointType) -> AcceptanceRange {
    let bounds = match data_type {
        DataPointType::Wind => acceptance::WIND,
        DataPointType::Temperature => acceptance::TEMPERATURE,
        DataPointType::Humidity => acceptance::HUMIDITY,
        DataPointType::Pressure => acceptance::PRESSURE,
        DataPointType::CloudCover => acceptance::CLOUD_COVER,
        DataPointType::Precipitation => acceptance::PRECIPITATION,
    };
    AcceptanceRange::from_bounds(bounds)
}

/// Check if a reading passes the acceptance range for its data type
pub fn passes_acceptance(data_type: DataPointType, data_point: &DataPoint) -> bool {
    acceptance_range(data_type).contains(data_point.mean)
}
