//! Data models for the weather pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---

/// Raw current-weather payload from the API.
///
/// Only the fields the pipeline reads are declared; everything else in the
/// response body is ignored.
#[derive(Debug, Deserialize)]
pub struct RawWeatherResponse {
    // ---
    pub main: RawMain,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    pub dt: i64,
}

#[derive(Debug, Deserialize)]
pub struct RawMain {
    pub temp: f64,
    pub feels_like: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawCondition {
    pub main: String,
}

/// One normalized weather observation for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    // ---
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate of one city's readings for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    // ---
    pub city: String,
    pub date: NaiveDate,
    pub avg_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub dominant_condition: String,
}

/// Transient alert event, emitted to the log and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub city: String,
    pub message: String,
}

/// Normalization of the raw payload
impl RawWeatherResponse {
    // ---
    /// Map the payload onto a [`Reading`] for `city`.
    ///
    /// Fails when the `weather` array is empty or `dt` is not a representable
    /// instant.
    pub fn to_reading(&self, city: &str) -> Result<Reading, String> {
        // ---
        let condition = self
            .weather
            .first()
            .map(|w| w.main.clone())
            .ok_or_else(|| "weather[0].main is missing".to_string())?;

        let timestamp = DateTime::from_timestamp(self.dt, 0)
            .ok_or_else(|| format!("dt {} is out of range", self.dt))?;

        Ok(Reading {
            city: city.to_string(),
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            condition,
            timestamp,
        })
    }
}
