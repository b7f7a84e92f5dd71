use std::any::Any;
use std::sync::atomic::Ordering;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use savetips_common::{generate_tips, RequestError, TipsRequest};

use crate::state::AppState;

pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while generating suggestions.";

#[derive(Debug, Serialize)]
struct TipsBody {
    status: &'static str,
    tips: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

#[derive(Debug)]
pub enum ApiError {
    Validation(RequestError),
    Internal(anyhow::Error),
}

impl From<RequestError> for ApiError {
    fn from(e: RequestError) -> Self {
        ApiError::Validation(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
            // Detail stays in the logs.
            ApiError::Internal(_) => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = ErrorBody {
        status: "error",
        message,
    };
    (status, Json(body)).into_response()
}

pub fn new_request_id() -> String {
    format!("req_{}", Uuid::new_v4())
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Tips endpoint. Accepts any method; the body is read as JSON when possible.
pub async fn cost_saving_suggestions(State(st): State<AppState>, body: Bytes) -> Response {
    let request_id = new_request_id();
    let span = tracing::info_span!("cost_saving_suggestions", request_id = %request_id);

    span.in_scope(|| match TipsRequest::from_json(&body) {
        Ok(req) => {
            let tips = generate_tips(req.monthly_budget, req.current_spent, st.random.as_ref());
            tracing::info!(
                monthly_budget = req.monthly_budget,
                current_spent = req.current_spent,
                tips = tips.len(),
                "generated tips"
            );
            (
                StatusCode::OK,
                Json(TipsBody {
                    status: "success",
                    tips,
                }),
            )
                .into_response()
        }
        Err(e) => {
            st.metrics.validation_failures.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(error = %e, "rejected tips request");
            ApiError::from(e).into_response()
        }
    })
}

/// Maps a handler panic to the generic 500 body.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "error generating suggestions");
    ApiError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
