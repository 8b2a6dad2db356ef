//! Request Metrics
//!
//! Prometheus exposition of per-route request counts.

use axum::{
    extract::{MatchedPath, Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;

use crate::AppState;

/// Counter incremented once per request to a counted route
pub const REQUESTS_TOTAL: &str = "requests_total";

/// Routes whose requests are counted, as (path, method)
pub const COUNTED_ROUTES: [(&str, &str); 4] = [
    ("/status", "GET"),
    ("/predict", "GET"),
    ("/predict/json", "GET"),
    ("/predict/json", "POST"),
];

/// Install the process-wide Prometheus recorder. Call once, before serving.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Describe the request counter and publish every series at zero
pub fn register_request_counters() {
    describe_counter!(REQUESTS_TOTAL, "Total number of requests");
    for (path, method) in COUNTED_ROUTES {
        counter!(REQUESTS_TOTAL, "path" => path, "method" => method).absolute(0);
    }
}

/// Middleware counting requests by matched route and method
pub async fn track_requests(req: Request, next: Next) -> Response {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let method = req.method().to_string();

    counter!(REQUESTS_TOTAL, "path" => path, "method" => method).increment(1);

    next.run(req).await
}

/// Prometheus text exposition
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
