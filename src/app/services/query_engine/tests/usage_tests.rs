//! Tests for query usage accounting

use crate::app::services::query_engine::{RadiusKey, UsageCounters};

#[test]
fn test_counters_accumulate() {
    let mut usage = UsageCounters::new();

    usage.record("BOS", 0.0);
    usage.record("BOS", 250.0);
    usage.record("JFK", 250.0);

    assert_eq!(usage.airport_count("BOS"), 2);
    assert_eq!(usage.airport_count("JFK"), 1);
    assert_eq!(usage.airport_count("LGA"), 0);
    assert_eq!(usage.distinct_airports(), 2);
    assert_eq!(usage.radius_count(250.0), 2);
    assert_eq!(usage.radius_count(0.0), 1);
}

#[test]
fn test_negative_zero_folds_into_zero() {
    assert_eq!(RadiusKey::from_radius(-0.0), RadiusKey::from_radius(0.0));

    let mut usage = UsageCounters::new();
    usage.record("BOS", -0.0);
    assert_eq!(usage.radius_count(0.0), 1);
}

#[test]
fn test_forget_and_clear() {
    let mut usage = UsageCounters::new();
    usage.record("BOS", 10.0);
    usage.record("JFK", 20.0);

    usage.forget_airport("BOS");
    assert_eq!(usage.airport_count("BOS"), 0);
    assert_eq!(usage.distinct_airports(), 1);
    // Radius history survives airport removal
    assert_eq!(usage.radius_count(10.0), 1);

    usage.clear();
    assert_eq!(usage.distinct_airports(), 0);
    assert_eq!(usage.radius_counts().count(), 0);
}
