//! Atmospheric record storage
//!
//! One [`AtmosphericInformation`] record per registered airport, keyed by
//! IATA code exactly like the airport registry. Updates are validated
//! against the acceptance range of their data type and merged last-write-wins
//! per type; a rejected update changes nothing.

use crate::app::models::{AtmosphericInformation, DataPoint, DataPointType, UpdateOutcome};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

pub mod acceptance;

#[cfg(test)]
pub mod tests;

pub use acceptance::{AcceptanceRange, acceptance_range, passes_acceptance};

/// Latest atmospheric readings for every registered airport
#[derive(Debug, Clone, Default)]
pub struct AtmosphericStore {
    /// Records indexed by IATA code
    records: HashMap<String, AtmosphericInformation>,
}

impl AtmosphericStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the empty record paired with a newly registered airport
    ///
    /// An existing record for the code is left as it is.
    pub fn create_record(&mut self, code: &str) {
        self.records.entry(code.to_string()).or_default();
    }

    /// Drop the record of a removed airport
    pub fn remove_record(&mut self, code: &str) -> Option<AtmosphericInformation> {
        self.records.remove(code)
    }

    /// Apply a reading for one data type
    ///
    /// On acceptance the previous reading of that type is overwritten and the
    /// record's last update time set to `now`. On rejection the record is
    /// untouched and `UpdateOutcome::Rejected` is returned.
    ///
    /// # Errors
    /// * `Error::AirportNotFound` if no record exists for `code`
    pub fn update(
        &mut self,
        code: &str,
        data_type: DataPointType,
        data_point: DataPoint,
        now: DateTime<Utc>,
    ) -> Result<UpdateOutcome> {
        let record = self
            .records
            .get_mut(code)
            .ok_or_else(|| Error::airport_not_found(code))?;

        if !passes_acceptance(data_type, &data_point) {
            let range = acceptance_range(data_type);
            warn!(
                "Rejected {} reading for {}: mean {} outside [{}, {})",
                data_type, code, data_point.mean, range.lower, range.upper
            );
            return Ok(UpdateOutcome::Rejected {
                data_type,
                mean: data_point.mean,
            });
        }

        record.set_reading(data_type, data_point, now);
        debug!(
            "Accepted {} reading for {}: mean {}",
            data_type, code, data_point.mean
        );
        Ok(UpdateOutcome::Accepted)
    }

    /// Get the record for an airport
    pub fn get(&self, code: &str) -> Result<&AtmosphericInformation> {
        self.records
            .get(code)
            .ok_or_else(|| Error::airport_not_found(code))
    }

    /// True iff at least one data type slot of the record holds a reading
    pub fn is_populated(record: &AtmosphericInformation) -> bool {
        record.is_populated()
    }

    /// True iff the record is populated and was updated within `window` of `now`
    pub fn is_fresh(record: &AtmosphericInformation, now: DateTime<Utc>, window: Duration) -> bool {
        record.is_fresh(now, window)
    }

    /// Number of records updated within `window` of `now`
    pub fn fresh_count(&self, now: DateTime<Utc>, window: Duration) -> usize {
        self.records
            .values()
            .filter(|record| record.is_fresh(now, window))
            .count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove every record
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
