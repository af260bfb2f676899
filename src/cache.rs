//! Rolling per-city history of readings.
//!
//! Owned exclusively by the scheduler; evaluators only ever see `&[Reading]`
//! slices borrowed from it.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::Reading;

// ---

/// How long a reading stays in the cache.
pub const RETENTION: TimeDelta = TimeDelta::hours(24);

/// City -> readings in insertion (= chronological) order.
#[derive(Debug, Clone, Default)]
pub struct CityCache {
    readings: HashMap<String, Vec<Reading>>,
}

impl CityCache {
    // ---
    /// Start with an empty sequence for every configured city.
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // ---
        let readings = cities
            .into_iter()
            .map(|city| (city.into(), Vec::new()))
            .collect();
        Self { readings }
    }

    /// Append a reading to its city's sequence.
    ///
    /// Returns `false` without inserting when the reading is older than the
    /// newest cached one, so the sequence stays non-decreasing.
    pub fn append(&mut self, reading: Reading) -> bool {
        // ---
        let seq = self.readings.entry(reading.city.clone()).or_default();
        if let Some(last) = seq.last() {
            if reading.timestamp < last.timestamp {
                return false;
            }
        }
        seq.push(reading);
        true
    }

    /// Readings for `city`, oldest first. Empty for unknown cities.
    pub fn readings(&self, city: &str) -> &[Reading] {
        // ---
        self.readings.get(city).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drop every reading of `city` with `now - timestamp > 24h`.
    ///
    /// Returns the number of readings removed.
    pub fn trim(&mut self, city: &str, now: DateTime<Utc>) -> usize {
        // ---
        let Some(seq) = self.readings.get_mut(city) else {
            return 0;
        };
        let before = seq.len();
        seq.retain(|r| now - r.timestamp <= RETENTION);
        before - seq.len()
    }

    pub fn contains_city(&self, city: &str) -> bool {
        self.readings.contains_key(city)
    }

    /// Owned copy of the whole cache, for publishing outside the loop.
    pub fn snapshot(&self) -> HashMap<String, Vec<Reading>> {
        self.readings.clone()
    }
}
