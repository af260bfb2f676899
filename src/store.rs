//! Persistence sink for readings and daily summaries.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::{DailySummary, Reading};

// ---

/// Write path the scheduler persists through.
///
/// Each call is one unit of work; retries and pooling belong to the
/// implementation.
#[async_trait]
pub trait WeatherStore: Send + Sync {
    async fn store_reading(&self, reading: &Reading) -> Result<()>;

    /// Upsert by (city, date): a later call for the same day replaces the row.
    async fn store_summary(&self, summary: &DailySummary) -> Result<()>;
}

/// PostgreSQL-backed store, one transaction per call.
#[derive(Debug, Clone)]
pub struct PgWeatherStore {
    pool: PgPool,
}

impl PgWeatherStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WeatherStore for PgWeatherStore {
    // ---
    async fn store_reading(&self, reading: &Reading) -> Result<()> {
        // ---
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO weather_data (
                city, temperature, feels_like, condition, timestamp_utc
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&reading.city)
        .bind(reading.temperature)
        .bind(reading.feels_like)
        .bind(&reading.condition)
        .bind(reading.timestamp)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn store_summary(&self, summary: &DailySummary) -> Result<()> {
        // ---
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO daily_summary (
                city, date, avg_temp, max_temp, min_temp, dominant_condition
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (city, date) DO UPDATE SET
                avg_temp           = EXCLUDED.avg_temp,
                max_temp           = EXCLUDED.max_temp,
                min_temp           = EXCLUDED.min_temp,
                dominant_condition = EXCLUDED.dominant_condition
            "#,
        )
        .bind(&summary.city)
        .bind(summary.date)
        .bind(summary.avg_temp)
        .bind(summary.max_temp)
        .bind(summary.min_temp)
        .bind(&summary.dominant_condition)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
