//! Health and diagnostics reporting
//!
//! Builds a snapshot from record freshness and the query usage counters.
//! The JSON field names (`datasize`, `iata_freq`, `radius_freq`) are the ones
//! monitoring already scrapes.

use crate::app::services::airport_registry::AirportRegistry;
use crate::app::services::atmospheric_store::AtmosphericStore;
use crate::app::services::query_engine::UsageCounters;
use crate::constants::{
    DEFAULT_HISTOGRAM_MAX_RADIUS, MAX_HISTOGRAM_LENGTH, RADIUS_HISTOGRAM_MODULUS,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Diagnostic snapshot of the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Number of populated records updated within the freshness window
    #[serde(rename = "datasize")]
    pub fresh_record_count: usize,

    /// Queries per registered airport divided by the number of distinct airports queried
    #[serde(rename = "iata_freq")]
    pub per_airport_query_fraction: BTreeMap<String, f64>,

    /// Distinct radius values per `floor(radius) mod 10` class
    #[serde(rename = "radius_freq")]
    pub radius_histogram: Vec<u64>,
}

impl HealthReport {
    /// One-line summary for logs and the CLI
    pub fn summary(&self) -> String {
        let queried = self
            .per_airport_query_fraction
            .values()
            .filter(|fraction| **fraction > 0.0)
            .count();
        format!(
            "{} fresh records | {} of {} airports queried | {} distinct radii",
            self.fresh_record_count,
            queried,
            self.per_airport_query_fraction.len(),
            self.radius_histogram.iter().sum::<u64>()
        )
    }
}

/// Assembles [`HealthReport`]s
pub struct HealthReporter;

impl HealthReporter {
    /// Build a report as of `now`
    ///
    /// Every registered airport appears in the fraction map; airports never
    /// queried report 0.0, as does every airport before the first query.
    pub fn report(
        registry: &AirportRegistry,
        store: &AtmosphericStore,
        usage: &UsageCounters,
        now: DateTime<Utc>,
        freshness_window: Duration,
    ) -> HealthReport {
        let fresh_record_count = store.fresh_count(now, freshness_window);

        let distinct = usage.distinct_airports();
        let per_airport_query_fraction = registry
            .codes()
            .into_iter()
            .map(|code| {
                let fraction = if distinct == 0 {
                    0.0
                } else {
                    usage.airport_count(&code) as f64 / distinct as f64
                };
                (code, fraction)
            })
            .collect();

        HealthReport {
            fresh_record_count,
            per_airport_query_fraction,
            radius_histogram: radius_histogram(usage),
        }
    }
}

/// Bucket the distinct radii seen so far by `floor(radius) mod 10`
///
/// The array is `floor(max radius) + 1` long (1001 before any query). The
/// length never exceeds [`MAX_HISTOGRAM_LENGTH`], so a radius beyond about
/// 20 037 km yields a shorter array than the `floor + 1` rule gives. Only the
/// first ten buckets can be non-zero.
pub fn radius_histogram(usage: &UsageCounters) -> Vec<u64> {
    let max_radius = usage
        .radius_counts()
        .map(|(radius, _)| radius)
        .fold(None, |max: Option<f64>, radius| {
            Some(max.map_or(radius, |m| m.max(radius)))
        })
        .unwrap_or(DEFAULT_HISTOGRAM_MAX_RADIUS);

    let length = (max_radius.floor() as usize)
        .saturating_add(1)
        .min(MAX_HISTOGRAM_LENGTH);
    let mut histogram = vec![0u64; length];

    for (radius, _) in usage.radius_counts() {
        let bucket = (radius.floor() as usize) % RADIUS_HISTOGRAM_MODULUS;
        if let Some(slot) = histogram.get_mut(bucket) {
            *slot += 1;
        }
    }

    histogram
}
