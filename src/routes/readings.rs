use axum::{
    extract::Path, extract::State, http::StatusCode, response::IntoResponse, routing::get, Json,
    Router,
};
use tokio::sync::watch;
use tracing::debug;

use crate::LoopStatus;

// ---

pub fn router() -> Router<watch::Receiver<LoopStatus>> {
    // ---
    Router::new().route("/readings/{city}", get(handler))
}

/// Cached readings for one city as of the last completed cycle.
async fn handler(
    Path(city): Path<String>,
    State(status): State<watch::Receiver<LoopStatus>>,
) -> impl IntoResponse {
    // ---
    debug!("GET /readings/{}", city);

    // Clone out of the borrow so the watch lock is not held while serializing.
    let readings = status.borrow().readings.get(&city).cloned();

    match readings {
        Some(readings) => (StatusCode::OK, Json(readings)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(format!("Unknown city: {}", city)),
        )
            .into_response(),
    }
}
