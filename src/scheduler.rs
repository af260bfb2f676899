//! The polling loop: fetch every city, persist, cache, alert, summarize, trim.
//!
//! The loop owns the [`CityCache`] outright. Nothing else holds a reference to
//! it; the status API only sees copies published through a `watch` channel at
//! the end of each cycle.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::alert::AlertRule;
use crate::cache::CityCache;
use crate::fetcher::{FetchError, WeatherFetcher};
use crate::store::WeatherStore;
use crate::summary;
use crate::{Alert, Config, DailySummary, Reading};

// ---

/// Length of the 23:55..23:59 summary window.
///
/// The loop sleeps after each cycle, so consecutive cycles start
/// `interval + cycle time` apart. Any interval of this length or more can
/// step over the window.
const LATE_DAY_WINDOW: Duration = Duration::from_secs(5 * 60);

/// True when cycles spaced by `interval` can miss the late-day window.
pub fn may_skip_late_day_window(interval: Duration) -> bool {
    interval >= LATE_DAY_WINDOW
}

/// What the status API can see of the loop.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoopStatus {
    pub cycles: u64,
    pub last_cycle: Option<DateTime<Utc>>,
    pub readings: HashMap<String, Vec<Reading>>,
}

/// Outcome of one cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub fetched: Vec<String>,
    pub failed: Vec<String>,
    pub alerts: Vec<Alert>,
    pub summaries: Vec<DailySummary>,
    pub store_failures: usize,
    pub trimmed: usize,
}

pub struct Scheduler<S> {
    cities: Vec<String>,
    fetcher: WeatherFetcher,
    store: S,
    cache: CityCache,
    alert_rule: AlertRule,
    summary_offset: FixedOffset,
    interval: Duration,
    cycles: u64,
    status_tx: watch::Sender<LoopStatus>,
}

impl<S: WeatherStore> Scheduler<S> {
    // ---
    pub fn new(config: &Config, fetcher: WeatherFetcher, store: S) -> Self {
        // ---
        if may_skip_late_day_window(config.polling_interval) {
            warn!(
                "POLLING_INTERVAL_SECS={} plus cycle time reaches the {}s summary window; the 23:55 summary may be skipped on some days",
                config.polling_interval.as_secs(),
                LATE_DAY_WINDOW.as_secs()
            );
        }

        let cache = CityCache::new(config.cities.iter().cloned());
        let (status_tx, _) = watch::channel(LoopStatus {
            readings: cache.snapshot(),
            ..LoopStatus::default()
        });

        Self {
            cities: config.cities.clone(),
            fetcher,
            store,
            cache,
            alert_rule: AlertRule::new(config.temperature_threshold, config.alert_window),
            summary_offset: config.summary_offset,
            interval: config.polling_interval,
            cycles: 0,
            status_tx,
        }
    }

    /// Receiver for the snapshot published after every cycle.
    pub fn subscribe(&self) -> watch::Receiver<LoopStatus> {
        self.status_tx.subscribe()
    }

    pub fn cache(&self) -> &CityCache {
        &self.cache
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cycle forever, sleeping the configured interval between cycles.
    pub async fn run(mut self) {
        // ---
        info!(
            "Polling {} cities every {}s",
            self.cities.len(),
            self.interval.as_secs()
        );

        loop {
            let span = info_span!("cycle", n = self.cycles + 1);
            let report = self.run_cycle().instrument(span).await;

            info!(
                "Cycle {} done: {} fetched, {} failed, {} alerts, {} summaries, {} store failures",
                self.cycles,
                report.fetched.len(),
                report.failed.len(),
                report.alerts.len(),
                report.summaries.len(),
                report.store_failures
            );

            tokio::time::sleep(self.interval).await;
        }
    }

    /// Fetch every city concurrently, then process the results at the
    /// current wall-clock time.
    pub async fn run_cycle(&mut self) -> CycleReport {
        // ---
        let fetcher = &self.fetcher;
        let results = join_all(
            self.cities
                .iter()
                .map(|city| async move { (city.clone(), fetcher.fetch(city).await) }),
        )
        .await;

        self.process_results(results, Utc::now()).await
    }

    /// Apply one cycle's fetch results to the store and cache as of `now`.
    ///
    /// Cities are handled one after another; each city runs
    /// store -> append -> alert -> summary -> trim. Failures are logged and
    /// counted, never returned.
    pub async fn process_results(
        &mut self,
        results: Vec<(String, Result<Reading, FetchError>)>,
        now: DateTime<Utc>,
    ) -> CycleReport {
        // ---
        let mut report = CycleReport::default();
        let late_day = summary::in_late_day_window(now, self.summary_offset);

        for (city, result) in results {
            let reading = match result {
                Ok(reading) => reading,
                Err(e) => {
                    error!("Failed to fetch weather for {}: {}", city, e);
                    report.failed.push(city);
                    continue;
                }
            };

            if let Err(e) = self.store.store_reading(&reading).await {
                error!("Failed to store reading for {}: {:#}", city, e);
                report.store_failures += 1;
            }

            if !self.cache.append(reading) {
                warn!("Out-of-order reading for {} not cached", city);
            }

            if let Some(alert) = self.alert_rule.evaluate(&city, self.cache.readings(&city), now) {
                warn!("ALERT - {}: {}", alert.city, alert.message);
                report.alerts.push(alert);
            }

            if late_day {
                let today = summary::local_date(now, self.summary_offset);
                let summary = summary::summarize(
                    &city,
                    self.cache.readings(&city),
                    today,
                    self.summary_offset,
                );
                if let Some(summary) = summary {
                    match self.store.store_summary(&summary).await {
                        Ok(()) => {
                            info!(
                                "Stored summary for {} {}: avg {:.1}°C, max {:.1}°C, min {:.1}°C, {}",
                                summary.city,
                                summary.date,
                                summary.avg_temp,
                                summary.max_temp,
                                summary.min_temp,
                                summary.dominant_condition
                            );
                            report.summaries.push(summary);
                        }
                        Err(e) => {
                            error!("Failed to store summary for {}: {:#}", city, e);
                            report.store_failures += 1;
                        }
                    }
                }
            }

            let trimmed = self.cache.trim(&city, now);
            if trimmed > 0 {
                debug!("Trimmed {} readings for {}", trimmed, city);
            }
            report.trimmed += trimmed;
            report.fetched.push(city);
        }

        self.cycles += 1;
        self.status_tx.send_replace(LoopStatus {
            cycles: self.cycles,
            last_cycle: Some(now),
            readings: self.cache.snapshot(),
        });

        report
    }
}
