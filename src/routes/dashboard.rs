// src/routes/dashboard.rs
//! Whole-dashboard reads: the raw store snapshot and the overview section.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::debug;

use super::AppState;
use crate::models::{Alert, Field, SensorKind, SensorSnapshot};
use crate::queries::{self, AlertSummary, ReadingStatus, Trend};
use crate::store::DashboardState;

/// Alerts shown in the overview banner.
const OVERVIEW_ALERT_LIMIT: usize = 3;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/overview", get(overview))
}

async fn dashboard(State((store, _)): State<AppState>) -> Json<DashboardState> {
    // ---
    debug!("GET /api/dashboard");
    Json(store.snapshot())
}

/// One stat card of the overview section.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricCard {
    sensor: SensorKind,
    value: f64,
    trend: Trend,
    status: ReadingStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Overview {
    selected_field_id: String,
    field: Option<Field>,
    current: SensorSnapshot,
    metrics: Vec<MetricCard>,
    active_alerts: Vec<Alert>,
    alert_summary: AlertSummary,
}

/// Handle `GET /api/overview`.
///
/// Card values come from the per-field baseline; trends come from the last
/// two samples of the rolling series.
async fn overview(State((store, _)): State<AppState>) -> Json<Overview> {
    // ---
    debug!("GET /api/overview");

    let state = store.snapshot();
    let current = store.current_sensor_snapshot(&state.selected_field_id);
    let field = state
        .fields
        .iter()
        .find(|f| f.id == state.selected_field_id)
        .cloned();

    let metrics = SensorKind::ALL
        .iter()
        .map(|&sensor| {
            let value = current.value(sensor);
            MetricCard {
                sensor,
                value,
                trend: queries::trend(&state.sensor_data, sensor),
                status: queries::reading_status(sensor, value),
            }
        })
        .collect();

    Json(Overview {
        field,
        current,
        metrics,
        active_alerts: queries::active_alerts(&state.alerts, OVERVIEW_ALERT_LIMIT),
        alert_summary: queries::alert_summary(&state.alerts),
        selected_field_id: state.selected_field_id,
    })
}
