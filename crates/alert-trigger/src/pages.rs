//! HTML page rendering.
//!
//! View types carry pre-formatted strings so the Askama templates stay
//! simple.

use askama::Template;
use axum::response::Html;

use crate::state::{GaugeState, TriggerAction};

/// Render a template, degrading to an inline error body on failure.
fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(tmpl.render().unwrap_or_else(|e| {
        format!("<pre>Template error: {e}</pre>")
    }))
}

pub struct GaugeView {
    pub cpu: String,
    pub memory: String,
    pub error_rate: String,
    pub requests: u64,
    pub errors: u64,
}

impl GaugeView {
    pub fn from_state(state: &GaugeState) -> Self {
        Self {
            cpu: format!("{:.2}", state.cpu_percent),
            memory: format!("{:.2}", state.memory_percent),
            error_rate: format!("{:.2}", state.error_rate_percent),
            requests: state.request_count,
            errors: state.error_count,
        }
    }
}

pub struct LinkView {
    pub href: String,
    pub label: &'static str,
}

fn trigger_href(action: TriggerAction) -> String {
    format!("/trigger?action={}", action.as_str())
}

fn action_links() -> Vec<LinkView> {
    [
        (TriggerAction::HighCpu, "Trigger High CPU Alert (CPU > 80%)"),
        (TriggerAction::HighMemory, "Trigger High Memory Alert (Memory > 90%)"),
        (TriggerAction::HighErrors, "Trigger High Error Rate (Errors > 5%)"),
        (TriggerAction::Reset, "Reset All Metrics"),
    ]
    .into_iter()
    .map(|(action, label)| LinkView {
        href: trigger_href(action),
        label,
    })
    .collect()
}

fn endpoint_links() -> Vec<LinkView> {
    let mut links = vec![
        LinkView { href: "/".into(), label: "This page" },
        LinkView { href: "/metrics".into(), label: "Prometheus metrics" },
        LinkView { href: "/health".into(), label: "Health check" },
    ];
    links.extend([
        (TriggerAction::HighCpu, "Trigger high CPU"),
        (TriggerAction::HighMemory, "Trigger high memory"),
        (TriggerAction::HighErrors, "Trigger high errors"),
        (TriggerAction::Reset, "Reset metrics"),
    ]
    .into_iter()
    .map(|(action, label)| LinkView {
        href: trigger_href(action),
        label,
    }));
    links
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    gauges: GaugeView,
    actions: Vec<LinkView>,
    endpoints: Vec<LinkView>,
}

/// Status page listing current gauges and every available action.
pub fn index_page(state: &GaugeState) -> Html<String> {
    render(IndexTemplate {
        gauges: GaugeView::from_state(state),
        actions: action_links(),
        endpoints: endpoint_links(),
    })
}

#[derive(Template)]
#[template(path = "trigger.html")]
struct TriggerTemplate {
    message: String,
}

/// Confirmation page for `/trigger`. `raw_action` is echoed back when the
/// action was not recognized.
pub fn trigger_page(action: Option<TriggerAction>, raw_action: &str) -> Html<String> {
    let message = match action {
        Some(action) => action.message().to_string(),
        None => format!("Unknown action: {raw_action}"),
    };
    render(TriggerTemplate { message })
}
