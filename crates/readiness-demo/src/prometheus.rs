//! Prometheus text exposition format.

/// Application version reported by `demo_app_info`.
pub const APP_VERSION: &str = "1.0.0";

/// Content type for the `/metrics` response.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Values rendered on one scrape.
#[derive(Debug, Clone)]
pub struct ScrapeView<'a> {
    /// Seconds since process start, regardless of readiness.
    pub uptime_secs: f64,
    pub ready: bool,
    /// Path of the request being served.
    pub endpoint: &'a str,
}

/// Render the readiness metrics into Prometheus text format.
///
/// `demo_app_http_requests_total` is a single sample for the current
/// request's endpoint with value 1; it does not accumulate across requests.
pub fn render_prometheus(view: &ScrapeView<'_>) -> String {
    let blocks = [
        metric_block(
            "demo_app_info",
            "Application information",
            "gauge",
            &format!("{{version=\"{APP_VERSION}\"}}"),
            "1",
        ),
        metric_block(
            "demo_app_uptime_seconds",
            "Application uptime in seconds",
            "gauge",
            "",
            &format!("{:.2}", view.uptime_secs),
        ),
        metric_block(
            "demo_app_ready",
            "Application readiness status (1=ready, 0=not ready)",
            "gauge",
            "",
            &u8::from(view.ready).to_string(),
        ),
        metric_block(
            "demo_app_http_requests_total",
            "Total number of HTTP requests",
            "counter",
            &format!(
                "{{method=\"GET\",endpoint=\"{}\"}}",
                escape_label(view.endpoint)
            ),
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

/// Escape a label value per the exposition format.
fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
