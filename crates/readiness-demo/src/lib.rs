//! readiness-demo — a slow-starting service for exercising health checks.
//!
//! A one-shot timer started at launch flips the service to ready after a
//! fixed delay. Until then `/health` answers 503; afterwards 200. The
//! transition happens exactly once and never reverts.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/` | Status page (not-ready / ready variants) |
//! | GET | `/health` | Readiness check, 503 until ready |
//! | GET | `/metrics` | Prometheus exposition |

pub mod config;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod prometheus;
pub mod readiness;

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tracing::info;

pub use config::Config;
pub use error::ConfigError;
pub use readiness::{spawn_ready_timer, Readiness, ReadyMark, DEFAULT_READY_DELAY};

/// Shared state for handlers.
#[derive(Clone)]
pub struct AppState {
    pub readiness: Readiness,
    /// Configured delay, shown on the not-ready page.
    pub ready_delay: Duration,
}

/// Build the service router. The readiness timer is started separately
/// with [`spawn_ready_timer`].
pub fn build_router(readiness: Readiness, ready_delay: Duration) -> Router {
    let state = AppState {
        readiness,
        ready_delay,
    };

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
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
