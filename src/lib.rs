//! `weather-monitor`: polls a weather API for a fixed set of cities, stores
//! every reading, keeps a rolling 24h cache per city, raises sustained-heat
//! alerts and writes a late-day summary per city.
//!
//! Module layout:
//! - `config`    – environment-driven settings
//! - `models`    – raw API payload and domain types
//! - `fetcher`   – weather API client
//! - `cache`     – per-city rolling history
//! - `alert`     – sustained-heat rule
//! - `summary`   – daily aggregate and late-day window
//! - `store`     – persistence trait and PostgreSQL implementation
//! - `schema`    – table creation
//! - `scheduler` – the polling loop
//! - `routes`    – status API

pub mod alert;
pub mod cache;
pub mod config;
pub mod fetcher;
pub mod models;
pub mod routes;
pub mod scheduler;
pub mod schema;
pub mod store;
pub mod summary;

pub use config::Config;

// Re-exported at the crate root so sibling modules depend on `crate::` only
// and not on each other's file layout.
pub use models::{Alert, DailySummary, RawWeatherResponse, Reading};
pub use scheduler::{CycleReport, LoopStatus, Scheduler};
