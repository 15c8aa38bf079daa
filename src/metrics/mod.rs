//! Prometheus metrics for the recommendation pipeline

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};
use std::time::Duration;

static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "recommendation_requests_total",
        "Recommendation requests by terminal path (personalized/fallback/failed)",
        &["outcome"]
    )
    .expect("Failed to register recommendation requests metric")
});

static ENGINE_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "relevance_engine_duration_seconds",
        "Latency of external relevance engine invocations",
        &["status"],
        vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to register engine duration metric")
});

/// Count a request against its terminal path
pub fn record_request_outcome(outcome: &str) {
    REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Record one engine invocation
pub fn observe_engine_call(duration: Duration, success: bool) {
    let status = if success { "ok" } else { "error" };
    ENGINE_DURATION_SECONDS
        .with_label_values(&[status])
        .observe(duration.as_secs_f64());
}

/// GET /metrics
pub async fn serve_metrics() -> HttpResponse {
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }
    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
