//! Weather query engine
//!
//! Answers "conditions at X" and "conditions within R km of X" by combining
//! the airport registry, the atmospheric store and the haversine distance,
//! while counting every query for the health report.
//!
//! # Point versus radius queries
//!
//! A point query returns the centre's record whatever its state. A radius
//! query returns only populated records within range. A radius of exactly
//! zero is served by the point path, so it is never population-filtered.

use crate::app::models::AtmosphericInformation;
use crate::app::services::airport_registry::AirportRegistry;
use crate::app::services::atmospheric_store::AtmosphericStore;
use crate::app::services::distance::distance_km;
use crate::{Error, Result};
use tracing::debug;

pub mod usage;

#[cfg(test)]
pub mod tests;

pub use usage::{RadiusKey, UsageCounters};

/// Query dispatcher holding the usage counters
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    usage: UsageCounters,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current conditions at one airport
    ///
    /// Counts a query for the airport and for radius 0. Empty records are
    /// returned as they are.
    ///
    /// # Errors
    /// * `Error::AirportNotFound` if `iata` is not registered
    pub fn query_point(
        &mut self,
        registry: &AirportRegistry,
        store: &AtmosphericStore,
        iata: &str,
    ) -> Result<AtmosphericInformation> {
        let airport = registry.get(iata)?;
        let record = store.get(airport.code())?.clone();

        self.usage.record(airport.code(), 0.0);
        debug!("Point query for {}", airport.code());

        Ok(record)
    }

    /// Populated records of every airport within `radius` km of `iata`
    ///
    /// The centre itself is included when populated. Results are ordered by
    /// distance from the centre, ties broken by code. Airports with no defined
    /// distance from the centre never match. A zero radius behaves exactly
    /// like [`QueryEngine::query_point`].
    ///
    /// # Errors
    /// * `Error::InvalidQuery` if `radius` is negative or not finite
    /// * `Error::AirportNotFound` if `iata` is not registered
    pub fn query_radius(
        &mut self,
        registry: &AirportRegistry,
        store: &AtmosphericStore,
        iata: &str,
        radius: f64,
    ) -> Result<Vec<AtmosphericInformation>> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::invalid_query(format!(
                "radius must be a non-negative number of kilometres, got {}",
                radius
            )));
        }

        if radius == 0.0 {
            return self
                .query_point(registry, store, iata)
                .map(|record| vec![record]);
        }

        let center = registry.get(iata)?;
        self.usage.record(center.code(), radius);

        let mut matches = Vec::new();
        for airport in registry.list_all() {
            let distance = distance_km(center, airport);
            if distance.is_nan() || distance > radius {
                continue;
            }

            let record = store.get(airport.code())?;
            if record.is_populated() {
                matches.push((distance, airport.code(), record));
            }
        }

        matches.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));

        debug!(
            "Radius query for {} within {} km matched {} airports",
            center.code(),
            radius,
            matches.len()
        );

        Ok(matches
            .into_iter()
            .map(|(_, _, record)| record.clone())
            .collect())
    }

    /// Counters accumulated so far
    pub fn usage(&self) -> &UsageCounters {
        &self.usage
    }

    /// Drop the counters of a removed airport
    pub fn forget_airport(&mut self, code: &str) {
        self.usage.forget_airport(code);
    }

    /// Reset every counter
    pub fn reset(&mut self) {
        self.usage.clear();
    }
}
