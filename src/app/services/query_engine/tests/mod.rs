//! Shared fixtures for query engine tests

use crate::app::models::{DataPoint, DataPointType};
use crate::app::services::airport_registry::AirportRegistry;
use crate::app::services::atmospheric_store::AtmosphericStore;
use chrono::{DateTime, TimeZone, Utc};

pub mod usage_tests;

pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
}

/// Registry and store holding the New York area starter airports, all empty
pub fn create_test_fixture() -> (AirportRegistry, AtmosphericStore) {
    let mut registry = AirportRegistry::new();
    let mut store = AtmosphericStore::new();

    for (code, lat, lon) in [
        ("BOS", 42.364347, -71.005181),
        ("EWR", 40.6925, -74.168667),
        ("JFK", 40.639751, -73.778925),
        ("LGA", 40.777245, -73.872608),
        ("MMU", 40.79935, -74.4148747),
    ] {
        registry.add(code, lat, lon).unwrap();
        store.create_record(code);
    }

    (registry, store)
}

/// Submit an accepted wind reading with the given mean
pub fn submit_wind(store: &mut AtmosphericStore, code: &str, mean: f64) {
    let outcome = store
        .update(
            code,
            DataPointType::Wind,
            DataPoint::new(0, 4, 10, 20, mean),
            test_time(),
        )
        .unwrap();
    assert!(outcome.is_accepted());
}
