//! Weather API client: one request per city, normalized into a [`Reading`].

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::{RawWeatherResponse, Reading};

// ---

/// Why a fetch produced no reading.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("weather API returned status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Client for the current-weather endpoint.
///
/// Holds one pooled `reqwest::Client`; every [`fetch`](Self::fetch) is an
/// independent request bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    country_code: String,
}

impl WeatherFetcher {
    // ---
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        country_code: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        // ---
        let client = reqwest::Client::builder()
            .user_agent(concat!("weather-monitor/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            country_code: country_code.into(),
        })
    }

    /// Fetch and normalize the current weather for `city`.
    pub async fn fetch(&self, city: &str) -> Result<Reading, FetchError> {
        // ---
        let query = [
            ("q", format!("{},{}", city, self.country_code)),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];

        debug!("Fetching weather for {} from {}", city, self.api_url);

        let response = self.client.get(&self.api_url).query(&query).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let raw: RawWeatherResponse = serde_json::from_slice(&body)
            .map_err(|e| FetchError::Malformed(format!("{} for {}", e, city)))?;

        let reading = raw.to_reading(city).map_err(FetchError::Malformed)?;
        debug!(
            "Fetched {}: {:.1}°C (feels {:.1}°C), {} at {}",
            city, reading.temperature, reading.feels_like, reading.condition, reading.timestamp
        );
        Ok(reading)
    }
}
