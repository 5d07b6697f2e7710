//! alert-trigger — demo service for exercising alerting rules.
//!
//! # Usage
//!
//! ```text
//! alert-trigger --port 8080
//! curl 'http://localhost:8080/trigger?action=high_cpu'
//! ```

use clap::Parser;
use tracing::info;

use alert_trigger::{build_router, Config, Simulator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,alert_trigger=debug")),
        )
        .init();

    let config = Config::parse();
    let addr = config.listen_addr()?;

    info!(port = config.port, "starting alert trigger demo app");

    let router = build_router(Simulator::new());
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "server listening");
    for endpoint in [
        "/ (main page)",
        "/metrics (Prometheus metrics)",
        "/health (health check)",
        "/trigger?action=high_cpu (trigger high CPU)",
        "/trigger?action=high_memory (trigger high memory)",
        "/trigger?action=high_errors (trigger high errors)",
        "/trigger?action=reset (reset metrics)",
    ] {
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

    info!("alert trigger demo app stopped");
    Ok(())
}
