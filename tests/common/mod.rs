//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};

use weather_monitor::store::WeatherStore;
use weather_monitor::{Config, DailySummary, Reading};

// ---

/// In-memory store that records every write and can be told to fail.
#[derive(Default)]
pub struct MemoryStore {
    pub readings: Mutex<Vec<Reading>>,
    pub summaries: Mutex<Vec<DailySummary>>,
    pub fail_readings: bool,
    pub fail_summaries: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail_readings: true,
            fail_summaries: true,
            ..Self::default()
        }
    }

    pub fn readings(&self) -> Vec<Reading> {
        self.readings.lock().unwrap().clone()
    }

    pub fn summaries(&self) -> Vec<DailySummary> {
        self.summaries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn store_reading(&self, reading: &Reading) -> Result<()> {
        if self.fail_readings {
            bail!("connection refused");
        }
        self.readings.lock().unwrap().push(reading.clone());
        Ok(())
    }

    async fn store_summary(&self, summary: &DailySummary) -> Result<()> {
        if self.fail_summaries {
            bail!("connection refused");
        }
        let mut summaries = self.summaries.lock().unwrap();
        summaries.retain(|s| !(s.city == summary.city && s.date == summary.date));
        summaries.push(summary.clone());
        Ok(())
    }
}

pub fn test_config(api_url: &str, cities: &[&str], threshold: f64) -> Config {
    // ---
    Config {
        api_key: "test-key".to_string(),
        api_url: api_url.to_string(),
        country_code: "IN".to_string(),
        cities: cities.iter().map(|c| c.to_string()).collect(),
        db_url: "postgres://unused".to_string(),
        db_pool_max: 1,
        polling_interval: Duration::from_secs(60),
        temperature_threshold: threshold,
        alert_window: Duration::from_secs(3600),
        fetch_timeout: Duration::from_secs(5),
        summary_offset: FixedOffset::east_opt(0).unwrap(),
        http_port: 0,
    }
}

pub fn reading(city: &str, temperature: f64, condition: &str, at: DateTime<Utc>) -> Reading {
    // ---
    Reading {
        city: city.to_string(),
        temperature,
        feels_like: temperature + 1.0,
        condition: condition.to_string(),
        timestamp: at,
    }
}

pub fn payload(temperature: f64, condition: &str, dt: i64) -> serde_json::Value {
    // ---
    serde_json::json!({
        "main": { "temp": temperature, "feels_like": temperature + 1.0 },
        "weather": [{ "main": condition }],
        "dt": dt
    })
}
