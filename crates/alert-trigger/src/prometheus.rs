//! Prometheus text exposition format.
//!
//! Renders a [`GaugeState`] into the text exposition format for scraping
//! by a Prometheus server or compatible agent.

use crate::state::GaugeState;

/// Application version reported by `alert_demo_info`.
pub const APP_VERSION: &str = "1.0.0";

/// Content type for the `/metrics` response.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Render the workload state into Prometheus text format.
///
/// Gauges carry two decimals; metric blocks are separated by a blank line.
pub fn render_prometheus(state: &GaugeState) -> String {
    let blocks = [
        metric_block(
            "alert_demo_cpu_usage_percent",
            "CPU usage percentage (0-100)",
            "gauge",
            "",
            &format!("{:.2}", state.cpu_percent),
        ),
        metric_block(
            "alert_demo_memory_usage_percent",
            "Memory usage percentage (0-100)",
            "gauge",
            "",
            &format!("{:.2}", state.memory_percent),
        ),
        metric_block(
            "alert_demo_http_requests_total",
            "Total number of HTTP requests",
            "counter",
            "",
            &state.request_count.to_string(),
        ),
        metric_block(
            "alert_demo_http_errors_total",
            "Total number of HTTP errors (5xx)",
            "counter",
            "",
            &state.error_count.to_string(),
        ),
        metric_block(
            "alert_demo_error_rate_percent",
            "Error rate percentage (0-100)",
            "gauge",
            "",
            &format!("{:.2}", state.error_rate_percent),
        ),
        metric_block(
            "alert_demo_info",
            "Application information",
            "gauge",
            &format!("{{version=\"{APP_VERSION}\",app=\"alert-trigger\"}}"),
            "1",
        ),
    ];

    blocks.join("\n")
}

fn metric_block(name: &str, help: &str, kind: &str, labels: &str, value: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("# HELP {name} {help}\n"));
    out.push_str(&format!("# TYPE {name} {kind}\n"));
    out.push_str(&format!("{name}{labels} {value}\n"));
    out
}
