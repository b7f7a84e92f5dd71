use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

#[derive(Debug, Default)]
pub struct Metrics {
    pub requests_total: AtomicU64,
    pub requests_inflight: AtomicU64,
    pub status_2xx: AtomicU64,
    pub status_4xx: AtomicU64,
    pub status_5xx: AtomicU64,
    pub validation_failures: AtomicU64,
    pub internal_errors: AtomicU64,
}

impl Metrics {
    /// Counter for the status class; informational and redirect responses are not split out.
    fn status_counter(&self, status: StatusCode) -> Option<&AtomicU64> {
        if status.is_server_error() {
            Some(&self.status_5xx)
        } else if status.is_client_error() {
            Some(&self.status_4xx)
        } else if status.is_success() {
            Some(&self.status_2xx)
        } else {
            None
        }
    }
}

pub fn render_metrics(metrics: &Metrics) -> String {
    let series: [(&str, &str, &str, &AtomicU64); 7] = [
        (
            "savetips_requests_total",
            "counter",
            "Total requests handled by the gateway.",
            &metrics.requests_total,
        ),
        (
            "savetips_requests_inflight",
            "gauge",
            "Currently in-flight requests.",
            &metrics.requests_inflight,
        ),
        ("savetips_responses_2xx", "counter", "Total 2xx responses.", &metrics.status_2xx),
        ("savetips_responses_4xx", "counter", "Total 4xx responses.", &metrics.status_4xx),
        ("savetips_responses_5xx", "counter", "Total 5xx responses.", &metrics.status_5xx),
        (
            "savetips_validation_failures_total",
            "counter",
            "Tip requests rejected by input validation.",
            &metrics.validation_failures,
        ),
        (
            "savetips_internal_errors_total",
            "counter",
            "Tip requests that failed unexpectedly.",
            &metrics.internal_errors,
        ),
    ];

    let mut body = String::new();
    for (name, kind, help, value) in series {
        // Writing to a String cannot fail.
        let _ = write!(
            body,
            "# HELP {name} {help}\n# TYPE {name} {kind}\n{name} {}\n",
            value.load(Ordering::Relaxed)
        );
    }
    body
}

pub async fn metrics_handler(State(st): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        render_metrics(&st.metrics),
    )
}

/// Counts every response by status class and tracks requests in flight.
pub async fn track_requests(State(st): State<AppState>, req: Request<Body>, next: Next) -> Response {
    let metrics = &st.metrics;
    metrics.requests_inflight.fetch_add(1, Ordering::Relaxed);
    let resp = next.run(req).await;
    metrics.requests_inflight.fetch_sub(1, Ordering::Relaxed);

    metrics.requests_total.fetch_add(1, Ordering::Relaxed);
    if let Some(counter) = metrics.status_counter(resp.status()) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
    resp
}
