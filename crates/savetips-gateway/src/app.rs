use std::any::Any;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::{
    body::Body,
    middleware,
    routing::{any, get},
    Router,
};
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};
use tower_http::cors::{Any as CorsAny, CorsLayer};

use crate::handlers::{cost_saving_suggestions, healthz, panic_response};
use crate::metrics::{metrics_handler, track_requests, Metrics};
use crate::state::AppState;

pub const TIPS_PATH: &str = "/getCostSavingSuggestions";

/// CORS policy for the tips endpoint: any origin, method and header.
pub fn allow_any_origin() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(CorsAny)
        .allow_methods(CorsAny)
        .allow_headers(CorsAny)
}

/// Turns handler panics into the generic 500 body and counts them.
pub fn catch_panics(
    metrics: Arc<Metrics>,
) -> CatchPanicLayer<impl ResponseForPanic<ResponseBody = Body> + Clone> {
    CatchPanicLayer::custom(move |err: Box<dyn Any + Send + 'static>| {
        metrics.internal_errors.fetch_add(1, Ordering::Relaxed);
        panic_response(err)
    })
}

pub fn build_app(st: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route(TIPS_PATH, any(cost_saving_suggestions))
        .route("/healthz", get(healthz))
        .route("/health", get(healthz))
        .route("/metrics", get(metrics_handler))
        .layer(catch_panics(st.metrics.clone()))
        .layer(middleware::from_fn_with_state(st.clone(), track_requests))
        .layer(cors)
        .with_state(st)
}
