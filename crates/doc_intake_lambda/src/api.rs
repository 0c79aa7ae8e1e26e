//! HTTP surface of the upload API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{self, InvalidHeaderValue};
use axum::http::{HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use doc_intake_core::contract::{PresignError, PresignRequest, STATUS_OK};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::adapters::presign::UploadPresigner;
use crate::handlers::presign::{handle_presign_request, PresignSettings};

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";
const SERVER_ERROR_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.6.1";
const SERVER_ERROR_TITLE: &str = "An error occurred while processing your request.";

pub struct ApiState {
    pub presigner: Arc<dyn UploadPresigner + Send + Sync>,
    pub settings: PresignSettings,
}

pub fn build_router(
    state: Arc<ApiState>,
    allowed_origin: &str,
) -> Result<Router, InvalidHeaderValue> {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_str(allowed_origin)?)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/presign", post(presign))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        );

    Ok(router)
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": STATUS_OK }))
}

async fn presign(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<PresignRequest>,
) -> Response {
    match handle_presign_request(
        &request,
        &state.settings,
        state.presigner.as_ref(),
        Utc::now(),
        Uuid::new_v4(),
    ) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error @ PresignError::Validation(_)) => validation_error_response(&error),
        Err(error @ PresignError::Presign(_)) => problem_response(&error),
    }
}

fn error_status(error: &PresignError) -> StatusCode {
    StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn validation_error_response(error: &PresignError) -> Response {
    (
        error_status(error),
        Json(json!({
            "error": error.error_code(),
            "message": error.to_string(),
        })),
    )
        .into_response()
}

/// RFC 9457 problem details body for server-side failures.
fn problem_response(error: &PresignError) -> Response {
    let status = error_status(error);
    let body = json!({
        "type": SERVER_ERROR_TYPE,
        "title": SERVER_ERROR_TITLE,
        "status": status.as_u16(),
        "detail": error.to_string(),
    });

    (
        status,
        [(header::CONTENT_TYPE, PROBLEM_CONTENT_TYPE)],
        body.to_string(),
    )
        .into_response()
}
