// src/routes/mod.rs
//! Gateway that merges every section's sub-router under one shared state.

use std::sync::Arc;

use axum::Router;

use crate::{Config, DashboardStore};

mod alerts;
mod dashboard;
mod fields;
mod health;
mod history;
mod reports;
mod rules;
mod sensors;
mod theme;

/// Shared state handed to every handler.
pub type AppState = (Arc<DashboardStore>, Config);

// ---

pub fn router(store: Arc<DashboardStore>, config: Config) -> Router {
    // ---
    Router::new()
        .merge(dashboard::router())
        .merge(fields::router())
        .merge(sensors::router())
        .merge(alerts::router())
        .merge(rules::router())
        .merge(history::router())
        .merge(reports::router())
        .merge(theme::router())
        .merge(health::router())
        .with_state((store, config))
}
