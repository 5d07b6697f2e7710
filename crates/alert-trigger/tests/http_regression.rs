//! Router-level regression tests.
//!
//! Drive the full router in-process and check the observable behavior an
//! external scraper or alert rule would depend on. Gauge drift is random,
//! so assertions are on bounds and direction only. Note that both `/` and
//! `/metrics` drift the gauges, so the number of scrapes matters.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use alert_trigger::handlers::HealthBody;
use alert_trigger::{build_router, Simulator};

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn sample(metrics: &str, name: &str) -> f64 {
    metrics
        .lines()
        .filter(|l| !l.starts_with('#'))
        .find_map(|l| l.strip_prefix(name)?.strip_prefix(' '))
        .unwrap_or_else(|| panic!("metric {name} missing from:\n{metrics}"))
        .parse()
        .unwrap()
}

async fn scrape(router: &Router) -> String {
    let (status, body) = get(router, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn high_cpu_then_metrics_within_one_drift_step() {
    let router = build_router(Simulator::new());

    let (status, body) = get(&router, "/trigger?action=high_cpu").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("High CPU mode activated! CPU usage set to 85%"));

    let cpu = sample(&scrape(&router).await, "alert_demo_cpu_usage_percent");
    assert!((85.0..=87.0).contains(&cpu), "cpu = {cpu}");
}

#[tokio::test]
async fn high_cpu_is_non_decreasing_until_saturated() {
    let router = build_router(Simulator::new());
    get(&router, "/trigger?action=high_cpu").await;

    let mut prev = 85.0;
    for _ in 0..40 {
        let cpu = sample(&scrape(&router).await, "alert_demo_cpu_usage_percent");
        assert!(cpu >= prev, "cpu dropped from {prev} to {cpu}");
        assert!(cpu <= 100.0);
        prev = cpu;
    }

    // Alternate with the status page, which also drifts.
    for _ in 0..200 {
        get(&router, "/").await;
    }
    let cpu = sample(&scrape(&router).await, "alert_demo_cpu_usage_percent");
    assert_eq!(cpu, 100.0);
}

#[tokio::test]
async fn reset_converges_to_floors() {
    let router = build_router(Simulator::new());
    get(&router, "/trigger?action=high_cpu").await;
    get(&router, "/trigger?action=high_memory").await;
    get(&router, "/trigger?action=high_errors").await;
    for _ in 0..10 {
        scrape(&router).await;
    }

    let (_, body) = get(&router, "/trigger?action=reset").await;
    assert!(body.contains("All metrics reset to normal values"));

    for _ in 0..50 {
        let metrics = scrape(&router).await;
        assert!(sample(&metrics, "alert_demo_cpu_usage_percent") >= 50.0);
        assert!(sample(&metrics, "alert_demo_memory_usage_percent") >= 50.0);
        assert!(sample(&metrics, "alert_demo_error_rate_percent") >= 0.0);
    }
}

#[tokio::test]
async fn high_errors_adds_one_hundred_per_call() {
    let router = build_router(Simulator::new());

    let before = sample(&scrape(&router).await, "alert_demo_http_errors_total");
    assert_eq!(before, 0.0);

    let (_, body) = get(&router, "/trigger?action=high_errors").await;
    assert!(body.contains("High Error Rate mode activated! Error rate set to 10%"));
    assert_eq!(sample(&scrape(&router).await, "alert_demo_http_errors_total"), 100.0);

    get(&router, "/trigger?action=high_errors").await;
    assert_eq!(sample(&scrape(&router).await, "alert_demo_http_errors_total"), 200.0);
}

#[tokio::test]
async fn repeated_action_key_uses_first_value() {
    let router = build_router(Simulator::new());

    let (status, body) = get(&router, "/trigger?action=high_cpu&action=reset").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("High CPU mode activated! CPU usage set to 85%"));

    let cpu = sample(&scrape(&router).await, "alert_demo_cpu_usage_percent");
    assert!((85.0..=87.0).contains(&cpu), "cpu = {cpu}");
}

#[tokio::test]
async fn action_is_found_among_other_keys() {
    let router = build_router(Simulator::new());
    let (_, body) = get(&router, "/trigger?source=ui&action=high_errors").await;
    assert!(body.contains("High Error Rate mode activated! Error rate set to 10%"));
}

#[tokio::test]
async fn high_memory_message() {
    let router = build_router(Simulator::new());
    let (_, body) = get(&router, "/trigger?action=high_memory").await;
    assert!(body.contains("High Memory mode activated! Memory usage set to 95%"));

    let mem = sample(&scrape(&router).await, "alert_demo_memory_usage_percent");
    assert!((95.0..=97.0).contains(&mem), "memory = {mem}");
}

#[tokio::test]
async fn unknown_or_missing_action_is_informational() {
    let router = build_router(Simulator::new());

    let (status, body) = get(&router, "/trigger?action=explode").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Unknown action: explode"));

    let (status, body) = get(&router, "/trigger").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Unknown action: "));

    let metrics = scrape(&router).await;
    assert_eq!(sample(&metrics, "alert_demo_cpu_usage_percent"), 50.0);
    assert_eq!(sample(&metrics, "alert_demo_http_errors_total"), 0.0);
}

#[tokio::test]
async fn every_known_route_counts_one_request() {
    let router = build_router(Simulator::new());

    get(&router, "/").await;
    get(&router, "/health").await;
    get(&router, "/trigger?action=reset").await;
    get(&router, "/trigger?action=nope").await;
    get(&router, "/does-not-exist").await;
    scrape(&router).await;

    // The scrape reports the count before itself; the 404 is not counted.
    let metrics = scrape(&router).await;
    assert_eq!(sample(&metrics, "alert_demo_http_requests_total"), 5.0);
}

#[tokio::test]
async fn health_is_always_healthy() {
    let router = build_router(Simulator::new());
    get(&router, "/trigger?action=high_errors").await;

    for _ in 0..3 {
        let (status, body) = get(&router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let health: HealthBody = serde_json::from_str(&body).unwrap();
        assert_eq!(health.status, "healthy");
        assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
    }
}

#[tokio::test]
async fn metrics_content_type_and_info() {
    let router = build_router(Simulator::new());
    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let resp = router.oneshot(req).await.unwrap();

    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("alert_demo_info{version=\"1.0.0\",app=\"alert-trigger\"} 1"));
}

#[tokio::test]
async fn unknown_path_is_404() {
    let router = build_router(Simulator::new());
    let (status, body) = get(&router, "/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "404 Not Found");
}

#[tokio::test]
async fn non_get_methods_are_rejected() {
    let router = build_router(Simulator::new());
    let req = Request::builder()
        .method(Method::POST)
        .uri("/trigger?action=high_cpu")
        .body(Body::empty())
        .unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    // Rejected requests leave the modes untouched.
    let cpu = sample(&scrape(&router).await, "alert_demo_cpu_usage_percent");
    assert_eq!(cpu, 50.0);
}

#[tokio::test]
async fn status_page_shows_gauges_and_links() {
    let router = build_router(Simulator::new());
    let (status, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Alert Trigger Demo Application"));
    assert!(body.contains("CPU Usage: 50.00%"));
    assert!(body.contains("/trigger?action=reset"));
}
