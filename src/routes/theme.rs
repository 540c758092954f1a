// src/routes/theme.rs
//! Light/dark theme flag.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use super::AppState;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/theme", get(theme))
        .route("/api/theme/toggle", post(toggle))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Theme {
    is_dark_mode: bool,
}

async fn theme(State((store, _)): State<AppState>) -> Json<Theme> {
    Json(Theme {
        is_dark_mode: store.is_dark_mode(),
    })
}

async fn toggle(State((store, _)): State<AppState>) -> Json<Theme> {
    // ---
    info!("POST /api/theme/toggle");
    Json(Theme {
        is_dark_mode: store.toggle_theme(),
    })
}
