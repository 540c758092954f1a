// src/routes/fields.rs
//! Fields, the selected-field pointer, and device controls.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::AppState;
use crate::models::{Device, Field, SensorSnapshot};
use crate::queries::{self, DeviceStats};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/fields", get(list_fields))
        .route("/api/fields/selected", get(selected_field).put(select_field))
        .route("/api/fields/{field_id}/devices", get(field_devices))
        .route("/api/fields/{field_id}/snapshot", get(field_snapshot))
        .route("/api/devices/{device_id}/toggle", post(toggle_device))
}

async fn list_fields(State((store, _)): State<AppState>) -> Json<Vec<Field>> {
    debug!("GET /api/fields");
    Json(store.fields())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectedField {
    field_id: String,
    field: Option<Field>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectFieldRequest {
    field_id: String,
}

async fn selected_field(State((store, _)): State<AppState>) -> Json<SelectedField> {
    // ---
    debug!("GET /api/fields/selected");
    Json(SelectedField {
        field_id: store.selected_field_id(),
        field: store.selected_field(),
    })
}

/// Handle `PUT /api/fields/selected`. Any id is accepted.
async fn select_field(
    State((store, _)): State<AppState>,
    Json(body): Json<SelectFieldRequest>,
) -> Json<SelectedField> {
    // ---
    info!("PUT /api/fields/selected - {}", body.field_id);
    store.select_field(&body.field_id);
    Json(SelectedField {
        field: store.selected_field(),
        field_id: body.field_id,
    })
}

#[derive(Debug, Serialize)]
struct FieldDevices {
    devices: Vec<Device>,
    stats: DeviceStats,
}

/// Handle `GET /api/fields/{field_id}/devices`. Unknown fields have no devices.
async fn field_devices(
    Path(field_id): Path<String>,
    State((store, _)): State<AppState>,
) -> Json<FieldDevices> {
    // ---
    debug!("GET /api/fields/{}/devices", field_id);
    let devices = store.devices_for_field(&field_id);
    let stats = queries::device_stats(&devices);
    Json(FieldDevices { devices, stats })
}

async fn field_snapshot(
    Path(field_id): Path<String>,
    State((store, _)): State<AppState>,
) -> Json<SensorSnapshot> {
    // ---
    debug!("GET /api/fields/{}/snapshot", field_id);
    Json(store.current_sensor_snapshot(&field_id))
}

/// Handle `POST /api/devices/{device_id}/toggle`.
///
/// Responds with the updated device, or `null` when no field owns the id.
async fn toggle_device(
    Path(device_id): Path<String>,
    State((store, _)): State<AppState>,
) -> Json<Option<Device>> {
    // ---
    info!("POST /api/devices/{}/toggle", device_id);
    Json(store.toggle_device(&device_id))
}
