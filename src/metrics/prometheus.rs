//! Prometheus metrics integration

use std::time::Duration;

use actix_web::{get, HttpResponse};
use once_cell::sync::Lazy;
use prometheus::{
    opts, register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder,
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};

static HUB_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        opts!("hub_requests_total", "Total number of requests sent to the orchestrator hub"),
        &["operation", "outcome"]
    )
    .expect("Failed to create hub requests counter")
});

static HUB_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        HistogramOpts::new(
            "hub_request_duration_seconds",
            "Orchestrator hub request duration in seconds"
        ),
        &["operation"]
    )
    .expect("Failed to create hub request duration histogram")
});

static KNOWLEDGE_PUBLISHED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "knowledge_items_published_total",
        "Knowledge items accepted by the hub"
    ))
    .expect("Failed to create knowledge published counter")
});

/// Initialize all metrics
pub fn init_metrics() {
    // Force lazy initialization
    Lazy::force(&HUB_REQUESTS_TOTAL);
    Lazy::force(&HUB_REQUEST_DURATION);
    Lazy::force(&KNOWLEDGE_PUBLISHED_TOTAL);
}

/// Record a completed hub request
pub fn record_hub_request(operation: &str, success: bool, elapsed: Duration) {
    let outcome = if success { "success" } else { "failure" };
    HUB_REQUESTS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
    HUB_REQUEST_DURATION
        .with_label_values(&[operation])
        .observe(elapsed.as_secs_f64());
}

/// Record a knowledge item accepted by the hub
pub fn record_knowledge_published() {
    KNOWLEDGE_PUBLISHED_TOTAL.inc();
}

/// Prometheus metrics endpoint
#[get("/metrics")]
pub async fn metrics_endpoint() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(format!("Failed to encode metrics: {}", e));
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(buffer)
}
