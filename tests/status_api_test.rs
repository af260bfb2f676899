//! Status API served from the snapshot the polling loop publishes.

mod common;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use weather_monitor::fetcher::WeatherFetcher;
use weather_monitor::{routes, Reading, Scheduler};

use common::{reading, test_config, MemoryStore};

#[derive(Debug, Deserialize)]
struct Health {
    status: String,
    cycles: u64,
    last_cycle: Option<DateTime<Utc>>,
}

/// Serve the router on an ephemeral port and return its base URL.
async fn serve(app: axum::Router) -> Result<String> {
    // ---
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn health_and_readings_follow_published_snapshot() -> Result<()> {
    // ---
    let cfg = test_config("http://127.0.0.1:9", &["Delhi", "Mumbai"], 40.0);
    let fetcher = WeatherFetcher::new(
        cfg.api_url.clone(),
        cfg.api_key.clone(),
        cfg.country_code.clone(),
        cfg.fetch_timeout,
    )?;
    let mut sched = Scheduler::new(&cfg, fetcher, MemoryStore::default());
    let base = serve(routes::router(sched.subscribe())).await?;
    let client = Client::new();

    // Before the first cycle
    let health: Health = client.get(format!("{}/health", base)).send().await?.json().await?;
    assert_eq!(health.status, "ok");
    assert_eq!(health.cycles, 0);
    assert!(health.last_cycle.is_none());

    let now = Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap();
    let results = vec![("Delhi".to_string(), Ok(reading("Delhi", 36.5, "Haze", now)))];
    sched.process_results(results, now).await;

    let health: Health = client.get(format!("{}/health", base)).send().await?.json().await?;
    assert_eq!(health.cycles, 1);
    assert_eq!(health.last_cycle, Some(now));

    let delhi: Vec<Reading> = client
        .get(format!("{}/readings/Delhi", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(delhi.len(), 1);
    assert_eq!(delhi[0].temperature, 36.5);
    assert_eq!(delhi[0].condition, "Haze");

    let mumbai: Vec<Reading> = client
        .get(format!("{}/readings/Mumbai", base))
        .send()
        .await?
        .json()
        .await?;
    assert!(mumbai.is_empty());

    let unknown = client.get(format!("{}/readings/Pune", base)).send().await?;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    Ok(())
}
