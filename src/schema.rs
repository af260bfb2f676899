//! Database schema management for `weather-monitor`.
//!
//! Ensures required tables and indexes exist before the polling loop starts.
//! Applied once on startup from `main.rs`.

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create or update the database schema (idempotent).
///
/// Creates the `weather_data` table for individual readings and the
/// `daily_summary` table keyed by (city, date). Safe to call on every
/// startup; no-op if objects already exist.
///
/// Errors are propagated if any SQL execution fails.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    // One row per successful fetch
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weather_data (
            id            BIGSERIAL PRIMARY KEY,
            city          TEXT             NOT NULL,
            temperature   DOUBLE PRECISION NOT NULL,
            feels_like    DOUBLE PRECISION NOT NULL,
            condition     TEXT             NOT NULL,
            timestamp_utc TIMESTAMPTZ      NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Late-day aggregates, rewritten while the 23:55 window is open
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS daily_summary (
            city               TEXT             NOT NULL,
            date               DATE             NOT NULL,
            avg_temp           DOUBLE PRECISION NOT NULL,
            max_temp           DOUBLE PRECISION NOT NULL,
            min_temp           DOUBLE PRECISION NOT NULL,
            dominant_condition TEXT             NOT NULL,
            PRIMARY KEY (city, date)
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_weather_data_city_ts
            ON weather_data (city, timestamp_utc);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
