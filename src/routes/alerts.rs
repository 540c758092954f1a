// src/routes/alerts.rs
//! Alert listing, acknowledgement, and creation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info};

use super::AppState;
use crate::models::{Alert, NewAlert};
use crate::queries::{self, AlertSummary};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/alerts", get(list_alerts).post(add_alert))
        .route("/api/alerts/summary", get(summary))
        .route("/api/alerts/{alert_id}/acknowledge", post(acknowledge))
}

/// Handle `GET /api/alerts`: unacknowledged first, newest first.
async fn list_alerts(State((store, _)): State<AppState>) -> Json<Vec<Alert>> {
    // ---
    debug!("GET /api/alerts");
    Json(queries::sorted_alerts(&store.alerts()))
}

async fn summary(State((store, _)): State<AppState>) -> Json<AlertSummary> {
    debug!("GET /api/alerts/summary");
    Json(queries::alert_summary(&store.alerts()))
}

async fn add_alert(
    State((store, _)): State<AppState>,
    Json(alert): Json<NewAlert>,
) -> (StatusCode, Json<Alert>) {
    // ---
    info!("POST /api/alerts - {}", alert.message);
    (StatusCode::CREATED, Json(store.add_alert(alert)))
}

/// Handle `POST /api/alerts/{alert_id}/acknowledge`.
///
/// Unknown or already-acknowledged ids leave the list as it was; the
/// response is always the current sorted list.
async fn acknowledge(
    Path(alert_id): Path<String>,
    State((store, _)): State<AppState>,
) -> Json<Vec<Alert>> {
    // ---
    info!("POST /api/alerts/{}/acknowledge", alert_id);
    store.acknowledge_alert(&alert_id);
    Json(queries::sorted_alerts(&store.alerts()))
}
