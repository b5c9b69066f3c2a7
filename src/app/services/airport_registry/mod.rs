//! Airport registry service for O(1) airport lookups
//!
//! This module owns the set of known airports, indexed by IATA code. It also
//! provides the parser for delimited airport feeds used to populate a
//! registry in bulk.

use crate::app::models::Airport;
use crate::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

pub mod loader;
pub mod metadata;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use loader::{parse_airport_feed, parse_airport_feed_reader};
pub use metadata::FeedLoadStats;

/// Airport registry providing O(1) lookups by IATA code
///
/// Codes are unique: adding a code that is already present fails and leaves
/// the registry untouched.
#[derive(Debug, Clone, Default)]
pub struct AirportRegistry {
    /// Airports indexed by IATA code
    pub(crate) airports: HashMap<String, Airport>,
}

impl AirportRegistry {
    /// Create a new empty airport registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a new airport
    ///
    /// # Errors
    /// * `Error::InvalidAirport` if the code or coordinates are out of range
    /// * `Error::DuplicateAirport` if the code is already registered
    pub fn add(&mut self, code: &str, latitude: f64, longitude: f64) -> Result<Airport> {
        let airport = Airport::new(code, latitude, longitude)?;
        self.insert(airport)
    }

    /// Register an already-validated airport
    pub fn insert(&mut self, airport: Airport) -> Result<Airport> {
        match self.airports.entry(airport.code().to_string()) {
            std::collections::hash_map::Entry::Occupied(_) => {
                Err(Error::duplicate_airport(airport.code()))
            }
            std::collections::hash_map::Entry::Vacant(e) => {
                debug!("Registered airport {}", airport);
                e.insert(airport.clone());
                Ok(airport)
            }
        }
    }

    /// Remove an airport by code, returning it
    pub fn remove(&mut self, code: &str) -> Result<Airport> {
        self.airports
            .remove(code)
            .ok_or_else(|| Error::airport_not_found(code))
    }

    /// Get an airport by code (O(1) lookup)
    pub fn find(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    /// Get an airport by code, failing when it is not registered
    pub fn get(&self, code: &str) -> Result<&Airport> {
        self.find(code).ok_or_else(|| Error::airport_not_found(code))
    }

    /// Check if an airport exists in the registry
    pub fn contains(&self, code: &str) -> bool {
        self.airports.contains_key(code)
    }

    /// All registered airports, in no particular order
    pub fn list_all(&self) -> Vec<&Airport> {
        self.airports.values().collect()
    }

    /// All registered IATA codes, sorted
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.airports.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Get the total number of airports in the registry
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Remove every airport
    pub fn clear(&mut self) {
        self.airports.clear();
    }
}
