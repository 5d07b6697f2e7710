//! HTTP handlers.
//!
//! Each handler reads the ready mark once, so status code, body and
//! metrics for one request always agree with each other.

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::pages;
use crate::prometheus::{render_prometheus, ScrapeView, CONTENT_TYPE};
use crate::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
    pub timestamp: String,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let ready = state
        .readiness
        .ready_mark()
        .map(|mark| (mark, mark.instant.elapsed()));
    pages::status_page(state.readiness.started_at(), ready, state.ready_delay)
}

/// GET /health — 200 once ready, 503 before.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let (code, status) = if state.readiness.is_ready() {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        code,
        Json(HealthBody {
            status: status.to_string(),
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        }),
    )
}

/// GET /metrics
pub async fn metrics(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    let body = render_prometheus(&ScrapeView {
        uptime_secs: state.readiness.uptime_since_start().as_secs_f64(),
        ready: state.readiness.is_ready(),
        endpoint: uri.path(),
    });
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], body)
}

/// Fallback for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "404 Not Found",
    )
}
