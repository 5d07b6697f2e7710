//! readiness-demo — slow-starting service for health check demonstrations.
//!
//! # Usage
//!
//! ```text
//! readiness-demo --port 8080 --ready-delay 60
//! ```

use clap::Parser;
use tracing::info;

use readiness_demo::{build_router, spawn_ready_timer, Config, Readiness};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,readiness_demo=debug")),
        )
        .init();

    let config = Config::parse();
    let addr = config.listen_addr()?;
    let delay = config.ready_delay();

    let readiness = Readiness::new();
    info!(
        port = config.port,
        start_time = %readiness.started_at().format("%Y-%m-%d %H:%M:%S"),
        "starting readiness demo app"
    );

    // Detached: the flag it sets is the only observable result.
    let _timer = spawn_ready_timer(readiness.clone(), delay);

    let router = build_router(readiness, delay);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "server listening");
    for endpoint in ["/ (main page)", "/health (health check)", "/metrics (Prometheus metrics)"] {
        info!("endpoint available: http://localhost:{}{endpoint}", config.port);
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("shutdown signal received");
        })
        .await?;

    info!("readiness demo app stopped");
    Ok(())
}
