//! alert-trigger — a demo workload whose metrics can be driven into
//! alerting ranges on demand.
//!
//! Holds simulated CPU, memory and error-rate gauges plus request/error
//! counters, and exposes them for scraping. The `/trigger` endpoint flips
//! alert modes so that an external rule engine can be validated end-to-end.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/` | Status page (drifts gauges) |
//! | GET | `/metrics` | Prometheus exposition (drifts gauges) |
//! | GET | `/health` | Liveness check, always 200 |
//! | GET | `/trigger?action=...` | `high_cpu`, `high_memory`, `high_errors`, `reset` |

pub mod config;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod prometheus;
pub mod state;

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tracing::info;

pub use config::Config;
pub use error::ConfigError;
pub use state::{GaugeState, Simulator, TriggerAction};

/// Shared state for handlers.
#[derive(Clone)]
pub struct AppState {
    pub simulator: Simulator,
}

/// Build the service router.
pub fn build_router(simulator: Simulator) -> Router {
    let state = AppState { simulator };

    Router::new()
        .route("/", get(handlers::index))
        .route("/metrics", get(handlers::metrics))
        .route("/health", get(handlers::health))
        .route("/trigger", get(handlers::trigger))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(access_log))
        .with_state(state)
}

/// Log every handled request, including 404s.
async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let resp = next.run(req).await;

    info!(
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "request handled"
    );
    resp
}
