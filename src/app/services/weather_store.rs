//! Shared weather store
//!
//! [`WeatherStore`] owns the airport registry, the atmospheric records and the
//! query counters as one unit behind a single reader-writer lock. Every
//! operation takes the lock once, so readers never observe an airport
//! without its record, a half-written reading, or a counter mid-update.
//!
//! The store is constructed at startup, shared with request handlers through
//! an `Arc`, and dropped at shutdown.

use crate::app::models::{Airport, AtmosphericInformation, DataPoint, DataPointType, UpdateOutcome};
use crate::app::services::airport_registry::AirportRegistry;
use crate::app::services::atmospheric_store::AtmosphericStore;
use crate::app::services::health::{HealthReport, HealthReporter};
use crate::app::services::query_engine::QueryEngine;
use crate::constants::{FRESHNESS_WINDOW, STARTER_AIRPORTS};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Default)]
struct WeatherState {
    registry: AirportRegistry,
    atmosphere: AtmosphericStore,
    queries: QueryEngine,
}

impl WeatherState {
    fn add(&mut self, airport: Airport) -> Result<Airport> {
        let airport = self.registry.insert(airport)?;
        self.atmosphere.create_record(airport.code());
        Ok(airport)
    }

    fn remove(&mut self, code: &str) -> Result<Airport> {
        let airport = self.registry.remove(code)?;
        self.atmosphere.remove_record(code);
        self.queries.forget_airport(code);
        Ok(airport)
    }

    fn clear(&mut self) {
        self.registry.clear();
        self.atmosphere.clear();
        self.queries.reset();
    }
}

/// Thread-safe store of airports, their latest readings and query counters
#[derive(Debug)]
pub struct WeatherStore {
    state: RwLock<WeatherState>,
    freshness_window: Duration,
}

impl Default for WeatherStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: RwLock::new(WeatherState::default()),
            freshness_window: FRESHNESS_WINDOW,
        }
    }

    /// Create a store seeded with the starter airports
    pub fn bootstrap() -> Result<Self> {
        let store = Self::new();
        store.seed_starter_airports()?;
        Ok(store)
    }

    /// Use a custom freshness window for health reports
    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = window;
        self
    }

    pub fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    /// Add the starter airports; codes already present are left alone
    pub fn seed_starter_airports(&self) -> Result<usize> {
        let mut state = self.state.write();
        let mut added = 0;
        for &(code, latitude, longitude) in STARTER_AIRPORTS {
            if state.registry.contains(code) {
                continue;
            }
            state.add(Airport::new(code, latitude, longitude)?)?;
            added += 1;
        }
        info!("Seeded {} starter airports", added);
        Ok(added)
    }

    /// Clear every airport, record and counter, then seed the starter airports
    pub fn reinitialize(&self) -> Result<()> {
        let mut state = self.state.write();
        state.clear();
        for &(code, latitude, longitude) in STARTER_AIRPORTS {
            state.add(Airport::new(code, latitude, longitude)?)?;
        }
        info!(
            "Weather store reinitialised with {} starter airports",
            STARTER_AIRPORTS.len()
        );
        Ok(())
    }

    // =========================================================================
    // Airports
    // =========================================================================

    /// Register an airport together with its empty atmospheric record
    pub fn add_airport(&self, code: &str, latitude: f64, longitude: f64) -> Result<Airport> {
        let airport = Airport::new(code, latitude, longitude)?;
        let airport = self.state.write().add(airport)?;
        info!("Added airport {}", airport);
        Ok(airport)
    }

    /// Register a batch of airports, skipping codes that are already present
    ///
    /// Returns the number of airports added.
    pub fn insert_airports(&self, airports: impl IntoIterator<Item = Airport>) -> usize {
        let mut state = self.state.write();
        let mut added = 0;
        for airport in airports {
            match state.add(airport) {
                Ok(_) => added += 1,
                Err(e) => warn!("Skipping airport: {}", e),
            }
        }
        info!("Inserted {} airports", added);
        added
    }

    /// Remove an airport along with its record and usage counter
    pub fn remove_airport(&self, code: &str) -> Result<Airport> {
        let airport = self.state.write().remove(code)?;
        info!("Removed airport {}", airport);
        Ok(airport)
    }

    pub fn find_airport(&self, code: &str) -> Option<Airport> {
        self.state.read().registry.find(code).cloned()
    }

    pub fn get_airport(&self, code: &str) -> Result<Airport> {
        self.find_airport(code)
            .ok_or_else(|| Error::airport_not_found(code))
    }

    /// All registered airports, in no particular order
    pub fn airports(&self) -> Vec<Airport> {
        self.state
            .read()
            .registry
            .list_all()
            .into_iter()
            .cloned()
            .collect()
    }

    /// All registered IATA codes, sorted
    pub fn airport_codes(&self) -> Vec<String> {
        self.state.read().registry.codes()
    }

    pub fn airport_count(&self) -> usize {
        self.state.read().registry.len()
    }

    // =========================================================================
    // Readings
    // =========================================================================

    /// Submit a reading stamped with the current time
    pub fn submit_reading(
        &self,
        code: &str,
        data_type: DataPointType,
        data_point: DataPoint,
    ) -> Result<UpdateOutcome> {
        self.submit_reading_at(code, data_type, data_point, Utc::now())
    }

    /// Submit a reading stamped with `now`
    pub fn submit_reading_at(
        &self,
        code: &str,
        data_type: DataPointType,
        data_point: DataPoint,
        now: DateTime<Utc>,
    ) -> Result<UpdateOutcome> {
        self.state
            .write()
            .atmosphere
            .update(code, data_type, data_point, now)
    }

    /// The stored record of an airport, without counting a query
    pub fn atmosphere(&self, code: &str) -> Result<AtmosphericInformation> {
        self.state.read().atmosphere.get(code).cloned()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current conditions at one airport
    pub fn query_point(&self, code: &str) -> Result<AtmosphericInformation> {
        let mut state = self.state.write();
        let WeatherState {
            registry,
            atmosphere,
            queries,
        } = &mut *state;
        queries.query_point(registry, atmosphere, code)
    }

    /// Populated conditions within `radius` km of an airport
    pub fn query_radius(&self, code: &str, radius: f64) -> Result<Vec<AtmosphericInformation>> {
        let mut state = self.state.write();
        let WeatherState {
            registry,
            atmosphere,
            queries,
        } = &mut *state;
        queries.query_radius(registry, atmosphere, code, radius)
    }

    /// Weather query as issued by clients: radius 0 is a point query
    pub fn query_weather(&self, code: &str, radius: f64) -> Result<Vec<AtmosphericInformation>> {
        if radius == 0.0 {
            self.query_point(code).map(|record| vec![record])
        } else {
            self.query_radius(code, radius)
        }
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Health snapshot as of now
    pub fn health(&self) -> HealthReport {
        self.health_at(Utc::now())
    }

    /// Health snapshot as of `now`
    pub fn health_at(&self, now: DateTime<Utc>) -> HealthReport {
        let state = self.state.read();
        HealthReporter::report(
            &state.registry,
            &state.atmosphere,
            state.queries.usage(),
            now,
            self.freshness_window,
        )
    }
}
