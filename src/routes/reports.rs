// src/routes/reports.rs
//! Placeholder report downloads.

use axum::{
    extract::{Path, Query},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::AppState;
use crate::export::{self, DateRange, ExportFormat, ReportKind};

// ---

pub fn router() -> Router<AppState> {
    Router::new().route("/api/reports/{kind}", get(report))
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    range: DateRange,
    #[serde(default)]
    format: ExportFormat,
    /// Field id or `all`. Recorded in the log only; the placeholder body
    /// does not vary by field.
    field: Option<String>,
}

/// Handle `GET /api/reports/{kind}`: a placeholder text report download.
///
/// Unknown kinds or ranges are rejected by the extractors with a 4xx.
async fn report(Path(kind): Path<ReportKind>, Query(params): Query<ReportQuery>) -> impl IntoResponse {
    // ---
    info!(
        "GET /api/reports/{:?} - range={} format={:?} field={:?}",
        kind, params.range, params.format, params.field
    );
    let now = Utc::now();

    (
        [
            (header::CONTENT_TYPE, "text/plain;charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export::report_file_name(kind, now)),
            ),
        ],
        export::report_content(kind, params.range, now),
    )
}
