// src/routes/health.rs
//! Liveness endpoint for the weather monitor.
//!
//! Reports the number of completed polling cycles and when the last one
//! finished, read from the snapshot the scheduler publishes. It never touches
//! the database or the weather API.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use crate::LoopStatus;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    cycles: u64,
    last_cycle: Option<DateTime<Utc>>,
}

/// Handle `GET /health`.
async fn health(State(status): State<watch::Receiver<LoopStatus>>) -> Json<HealthResponse> {
    // ---
    let (cycles, last_cycle) = {
        let snapshot = status.borrow();
        (snapshot.cycles, snapshot.last_cycle)
    };
    Json(HealthResponse {
        status: "ok",
        cycles,
        last_cycle,
    })
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<watch::Receiver<LoopStatus>> {
    Router::new().route("/health", get(health))
}
