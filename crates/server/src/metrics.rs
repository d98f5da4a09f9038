//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the Marquee server:
//! - HTTP request metrics (latency, counts, errors)
//! - Browser session metrics
//! - Core metrics (source fetches, cache, search, deep links)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use regex_lite::Regex;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "marquee_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "marquee_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Session Metrics
// =============================================================================

/// Live browser sessions (collected dynamically).
pub static SESSIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("marquee_sessions_active", "Number of live browser sessions").unwrap()
});

/// Sessions created (cumulative).
pub static SESSIONS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "marquee_sessions_created_total",
        "Total browser sessions created since startup",
    )
    .unwrap()
});

/// Sessions dropped for inactivity.
pub static SESSIONS_EXPIRED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "marquee_sessions_expired_total",
        "Total browser sessions dropped after the idle timeout",
    )
    .unwrap()
});

/// Session actions by kind.
pub static SESSION_ACTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_session_actions_total", "Session navigation actions"),
        &["action"],
    )
    .unwrap()
});

/// Register all metrics with the registry.
fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Sessions
    registry
        .register(Box::new(SESSIONS_ACTIVE.clone()))
        .unwrap();
    registry
        .register(Box::new(SESSIONS_CREATED_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(SESSIONS_EXPIRED_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(SESSION_ACTIONS.clone()))
        .unwrap();

    // Core metrics (source, cache, search, navigation)
    for metric in marquee_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Collect dynamic metrics from current application state.
///
/// This is called before encoding metrics to update gauges with current values.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    SESSIONS_ACTIVE.set(state.sessions().len().await as i64);
}

static UUID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .unwrap()
});

static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\d+(/|$)").unwrap());

static SESSION_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/sessions/[^/]+").unwrap());

/// Normalize a path for metric labels (replace IDs with placeholders).
///
/// Whatever follows `/sessions/` is a client-supplied id, valid or not.
pub fn normalize_path(path: &str) -> String {
    let result = UUID_SEGMENT.replace_all(path, "{id}");
    let result = SESSION_SEGMENT.replace_all(&result, "/sessions/{id}");
    let result = NUMERIC_SEGMENT.replace_all(&result, "/{n}$1");
    result.to_string()
}
