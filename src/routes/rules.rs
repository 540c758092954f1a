// src/routes/rules.rs
//! Automation rule configuration. Rules are stored and toggled here; nothing
//! evaluates them.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::AppState;
use crate::models::{AutomationRule, NewRule};
use crate::queries::{self, RuleStats};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/rules", get(list_rules).post(add_rule))
        .route("/api/rules/{rule_id}", delete(delete_rule))
        .route("/api/rules/{rule_id}/toggle", post(toggle_rule))
}

/// Query parameters for the rule listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesQuery {
    /// Restrict to one field; omit for every rule.
    field_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct RuleList {
    rules: Vec<AutomationRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<RuleStats>,
}

/// Handle `GET /api/rules`. Stats are included only for a single field.
async fn list_rules(
    Query(params): Query<RulesQuery>,
    State((store, _)): State<AppState>,
) -> Json<RuleList> {
    // ---
    debug!("GET /api/rules - {:?}", params);
    let rules = store.automation_rules();

    let list = match params.field_id {
        Some(field_id) => RuleList {
            stats: Some(queries::rule_stats(&rules, &field_id, Utc::now())),
            rules: queries::rules_for_field(&rules, &field_id),
        },
        None => RuleList { rules, stats: None },
    };
    Json(list)
}

async fn add_rule(
    State((store, _)): State<AppState>,
    Json(rule): Json<NewRule>,
) -> (StatusCode, Json<AutomationRule>) {
    // ---
    info!("POST /api/rules - {}", rule.name);
    (StatusCode::CREATED, Json(store.add_rule(rule)))
}

async fn toggle_rule(
    Path(rule_id): Path<String>,
    State((store, _)): State<AppState>,
) -> Json<Vec<AutomationRule>> {
    // ---
    info!("POST /api/rules/{}/toggle", rule_id);
    store.toggle_rule(&rule_id);
    Json(store.automation_rules())
}

async fn delete_rule(
    Path(rule_id): Path<String>,
    State((store, _)): State<AppState>,
) -> Json<Vec<AutomationRule>> {
    // ---
    info!("DELETE /api/rules/{}", rule_id);
    store.delete_rule(&rule_id);
    Json(store.automation_rules())
}
