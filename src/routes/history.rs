// src/routes/history.rs
//! History table and its CSV export.
//!
//! Both read the store's single history draw, so every page and the export
//! hold the same records until `POST /api/history/regenerate`.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use super::AppState;
use crate::export;
use crate::models::HistoricalRecord;
use crate::queries::{self, Page};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/history", get(history))
        .route("/api/history/export", get(export_csv))
        .route("/api/history/regenerate", post(regenerate))
}

/// Query parameters for the history table.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Field name to keep, or `all`.
    field: Option<String>,
    /// 1-based page number.
    page: Option<usize>,
}

async fn history(
    Query(params): Query<HistoryQuery>,
    State((store, config)): State<AppState>,
) -> Json<Page<HistoricalRecord>> {
    // ---
    debug!("GET /api/history - {:?}", params);

    let records = queries::filter_history(store.history(), params.field.as_deref());
    Json(queries::paginate(
        &records,
        params.page.unwrap_or(1),
        config.history_page_size as usize,
    ))
}

/// Handle `GET /api/history/export`: the filtered rows as a CSV download.
async fn export_csv(
    Query(params): Query<HistoryQuery>,
    State((store, _)): State<AppState>,
) -> impl IntoResponse {
    // ---
    let records = queries::filter_history(store.history(), params.field.as_deref());
    let now = Utc::now();
    info!("GET /api/history/export - {} records", records.len());

    (
        [
            (header::CONTENT_TYPE, "text/csv;charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export::history_file_name(now)),
            ),
        ],
        export::history_csv(&records),
    )
}

/// Handle `POST /api/history/regenerate`: draw a new table and return it.
async fn regenerate(State((store, _)): State<AppState>) -> Json<Vec<HistoricalRecord>> {
    // ---
    info!("POST /api/history/regenerate");
    Json(store.regenerate_history())
}
