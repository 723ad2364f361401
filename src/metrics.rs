// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the Aquarium operator.
//!
//! All metrics carry the `aquarium_operator_` prefix and are served in text format
//! on `/metrics`, next to a `/healthz` liveness endpoint.
//!
//! # Metrics
//!
//! - `aquarium_operator_reconciliations_total{status}` - passes by outcome
//! - `aquarium_operator_reconciliation_duration_seconds` - pass latency
//! - `aquarium_operator_requeues_total{reason}` - requeues scheduled by the controller
//! - `aquarium_operator_status_write_failures_total` - status writes that failed
//! - `aquarium_operator_aquarium_health{namespace,name,health}` - 1 for the current health
//!
//! # Example
//!
//! ```rust,no_run
//! use aquarium_operator::metrics::record_reconciliation_success;
//!
//! record_reconciliation_success(std::time::Duration::from_millis(120));
//! ```

use crate::constants::{HEALTH_SERVER_PATH, METRICS_SERVER_PATH};
use crate::crd::Health;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use prometheus::{
    Counter, CounterVec, Encoder, GaugeVec, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};
use std::net::SocketAddr;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{error, info};

// ============================================================================
// Metric Name Constants
// ============================================================================

/// Namespace prefix for all operator metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "aquarium_operator";

const INVALID_METRIC: &str = "metric definition must be valid and registered once";

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Total number of reconciliations by outcome
///
/// Labels:
/// - `status`: Outcome (`success`, `error`)
pub static RECONCILIATION_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_reconciliations_total"),
        "Total number of Aquarium reconciliations by outcome",
    );
    let counter = CounterVec::new(opts, &["status"]).expect(INVALID_METRIC);
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .expect(INVALID_METRIC);
    counter
});

/// Duration of reconciliations in seconds
pub static RECONCILIATION_DURATION_SECONDS: LazyLock<Histogram> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_reconciliation_duration_seconds"),
        "Duration of Aquarium reconciliations in seconds",
    )
    .buckets(vec![0.001, 0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]);
    let histogram = Histogram::with_opts(opts).expect(INVALID_METRIC);
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .expect(INVALID_METRIC);
    histogram
});

/// Requeues scheduled after a pass
///
/// Labels:
/// - `reason`: `resync` after success, `error` after failure
pub static REQUEUE_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_requeues_total"),
        "Total number of requeues by reason",
    );
    let counter = CounterVec::new(opts, &["reason"]).expect(INVALID_METRIC);
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .expect(INVALID_METRIC);
    counter
});

/// Status writes that failed and were skipped
pub static STATUS_WRITE_FAILURES_TOTAL: LazyLock<Counter> = LazyLock::new(|| {
    let counter = Counter::new(
        format!("{METRICS_NAMESPACE}_status_write_failures_total"),
        "Total number of Aquarium status writes that failed",
    )
    .expect(INVALID_METRIC);
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .expect(INVALID_METRIC);
    counter
});

/// Current health per aquarium
///
/// Labels:
/// - `namespace`, `name`: the aquarium
/// - `health`: `Healthy`, `Unhealthy` or `Unknown`; the current one is 1, the others 0
pub static AQUARIUM_HEALTH: LazyLock<GaugeVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_aquarium_health"),
        "Observed health of each Aquarium",
    );
    let gauge = GaugeVec::new(opts, &["namespace", "name", "health"]).expect(INVALID_METRIC);
    METRICS_REGISTRY
        .register(Box::new(gauge.clone()))
        .expect(INVALID_METRIC);
    gauge
});

/// Record a successful reconciliation
pub fn record_reconciliation_success(duration: Duration) {
    RECONCILIATION_TOTAL.with_label_values(&["success"]).inc();
    RECONCILIATION_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record a failed reconciliation
pub fn record_reconciliation_error(duration: Duration) {
    RECONCILIATION_TOTAL.with_label_values(&["error"]).inc();
    RECONCILIATION_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record a requeue
///
/// # Arguments
/// * `reason` - `resync` or `error`
pub fn record_requeue(reason: &str) {
    REQUEUE_TOTAL.with_label_values(&[reason]).inc();
}

pub fn record_status_write_failure() {
    STATUS_WRITE_FAILURES_TOTAL.inc();
}

/// Record the health classified for an aquarium
pub fn set_aquarium_health(namespace: &str, name: &str, health: Health) {
    for candidate in [Health::Healthy, Health::Unhealthy, Health::Unknown] {
        let label = candidate.to_string();
        let value = if candidate == health { 1.0 } else { 0.0 };
        AQUARIUM_HEALTH
            .with_label_values(&[namespace, name, label.as_str()])
            .set(value);
    }
}

/// Drop the health series of an aquarium that no longer exists
pub fn forget_aquarium(namespace: &str, name: &str) {
    for candidate in [Health::Healthy, Health::Unhealthy, Health::Unknown] {
        let label = candidate.to_string();
        // Absent series are not an error.
        let _ = AQUARIUM_HEALTH.remove_label_values(&[namespace, name, label.as_str()]);
    }
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}

async fn metrics_handler() -> (StatusCode, String) {
    match gather_metrics() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Router serving `/metrics` and `/healthz`
pub fn router() -> Router {
    Router::new()
        .route(METRICS_SERVER_PATH, get(metrics_handler))
        .route(HEALTH_SERVER_PATH, get(|| async { "ok" }))
}

/// Serve metrics and health endpoints until the process exits.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    info!("Metrics server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router()).await?;
    Ok(())
}
