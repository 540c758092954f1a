// src/routes/sensors.rs
//! The rolling sensor window.

use axum::{extract::State, routing::get, Json, Router};
use tracing::debug;

use super::AppState;
use crate::models::SensorSample;

// ---

pub fn router() -> Router<AppState> {
    Router::new().route("/api/sensors", get(series))
}

/// Handle `GET /api/sensors`: the rolling window, oldest sample first.
async fn series(State((store, _)): State<AppState>) -> Json<Vec<SensorSample>> {
    // ---
    debug!("GET /api/sensors");
    Json(store.sensor_series())
}
