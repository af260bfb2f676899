use axum::Router;
use tokio::sync::watch;

use crate::LoopStatus;

mod health;
mod readings;

// ---

pub fn router(status: watch::Receiver<LoopStatus>) -> Router {
    // ---
    Router::new()
        .merge(readings::router())
        .merge(health::router())
        .with_state(status)
}
