//! Status page rendering for `/`.

use std::time::Duration;

use askama::Template;
use axum::response::Html;
use chrono::{DateTime, Local};

use crate::readiness::ReadyMark;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(tmpl.render().unwrap_or_else(|e| {
        format!("<pre>Template error: {e}</pre>")
    }))
}

fn display(ts: DateTime<Local>) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

#[derive(Template)]
#[template(path = "not_ready.html")]
struct NotReadyTemplate {
    started: String,
    delay_secs: u64,
}

#[derive(Template)]
#[template(path = "ready.html")]
struct ReadyTemplate {
    started: String,
    ready_at: String,
    uptime: String,
}

/// Render the status page. `uptime` is measured from the ready mark.
pub fn status_page(
    started_at: DateTime<Local>,
    ready: Option<(ReadyMark, Duration)>,
    delay: Duration,
) -> Html<String> {
    match ready {
        None => render(NotReadyTemplate {
            started: display(started_at),
            delay_secs: delay.as_secs(),
        }),
        Some((mark, uptime)) => render(ReadyTemplate {
            started: display(started_at),
            ready_at: display(mark.at),
            uptime: format!("{:.2}", uptime.as_secs_f64()),
        }),
    }
}
