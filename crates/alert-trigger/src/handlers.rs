//! HTTP handlers.
//!
//! Every handler on a known route counts exactly one request against the
//! simulator. The fallback does not.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::pages;
use crate::prometheus::{render_prometheus, CONTENT_TYPE};
use crate::state::TriggerAction;
use crate::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
    pub timestamp: String,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let observed = state.simulator.scrape().await;
    pages::index_page(&observed)
}

/// GET /metrics
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let observed = state.simulator.scrape().await;
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], render_prometheus(&observed))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    state.simulator.record_request().await;
    Json(HealthBody {
        status: "healthy".to_string(),
        timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
    })
}

/// GET /trigger?action=...
///
/// The first `action` pair wins when the key is repeated. A missing or
/// malformed query is treated as an empty action.
pub async fn trigger(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Html<String> {
    let raw_action = query
        .ok()
        .and_then(|Query(pairs)| {
            pairs
                .into_iter()
                .find_map(|(key, value)| (key == "action").then_some(value))
        })
        .unwrap_or_default();
    let action = TriggerAction::parse(&raw_action);
    state.simulator.trigger(action).await;
    pages::trigger_page(action, &raw_action)
}

/// Fallback for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "404 Not Found",
    )
}
