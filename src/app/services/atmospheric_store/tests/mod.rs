//! Shared test utilities and fixtures for atmospheric store tests

use crate::app::models::DataPoint;
use crate::app::services::atmospheric_store::AtmosphericStore;
use chrono::{DateTime, TimeZone, Utc};


/// Fixed reference time for deterministic tests
pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
}

/// A reading with the given mean and plausible quartiles
pub fn create_data_point(mean: f64) -> DataPoint {
    DataPoint::new(10, 20, 30, 40, mean)
}

/// A store holding empty records for the given codes
pub fn create_test_store(codes: &[&str]) -> AtmosphericStore {
    let mut store = AtmosphericStore::new();
    for code in codes {
        store.create_record(code);
    }
    store
}
