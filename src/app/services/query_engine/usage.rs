//! Query usage counters
//!
//! Per-airport and per-radius query counts kept for the process lifetime.
//! Counts only grow; they are cleared by reinitialisation, and an airport's
//! entry is dropped when the airport is removed.

use std::collections::HashMap;

/// Hashable key for a query radius
///
/// Radii are compared by bit pattern after folding `-0.0` into `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RadiusKey(u64);

impl RadiusKey {
    pub fn from_radius(radius: f64) -> Self {
        let radius = if radius == 0.0 { 0.0 } else { radius };
        Self(radius.to_bits())
    }

    pub fn radius(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// Query counters by airport code and by radius
#[derive(Debug, Clone, Default)]
pub struct UsageCounters {
    airport_queries: HashMap<String, u64>,
    radius_queries: HashMap<RadiusKey, u64>,
}

impl UsageCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one query centred on `code` with the given radius
    pub fn record(&mut self, code: &str, radius: f64) {
        *self.airport_queries.entry(code.to_string()).or_insert(0) += 1;
        *self
            .radius_queries
            .entry(RadiusKey::from_radius(radius))
            .or_insert(0) += 1;
    }

    /// Number of queries centred on `code`
    pub fn airport_count(&self, code: &str) -> u64 {
        self.airport_queries.get(code).copied().unwrap_or(0)
    }

    /// Number of queries issued with `radius`
    pub fn radius_count(&self, radius: f64) -> u64 {
        self.radius_queries
            .get(&RadiusKey::from_radius(radius))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct airports that have been queried
    pub fn distinct_airports(&self) -> usize {
        self.airport_queries.len()
    }

    /// Every distinct radius seen so far with its query count
    pub fn radius_counts(&self) -> impl Iterator<Item = (f64, u64)> + '_ {
        self.radius_queries
            .iter()
            .map(|(key, count)| (key.radius(), *count))
    }

    /// Drop the counter of a removed airport
    pub fn forget_airport(&mut self, code: &str) {
        self.airport_queries.remove(code);
    }

    /// Reset every counter
    pub fn clear(&mut self) {
        self.airport_queries.clear();
        self.radius_queries.clear();
    }
}
