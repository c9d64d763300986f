// SPDX-License-Identifier: Apache-2.0

use crate::http::response_contract::api_error_response;
use crate::{AppState, CONFIG_SCHEMA_VERSION, CRATE_NAME};
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::atomic::Ordering;
use workout_finder_api::{openapi_v1_spec, ApiError};

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> Response {
    if !state.accepting_requests.load(Ordering::Relaxed) {
        return api_error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiError::not_ready("draining"),
        );
    }
    if !state.ready.load(Ordering::Relaxed) {
        return api_error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiError::not_ready("dataset check has not succeeded"),
        );
    }
    (StatusCode::OK, "ready").into_response()
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> Response {
    let body = state.metrics.render(state.engine.diagnostics());
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; version=0.0.4"),
        )],
        body,
    )
        .into_response()
}

pub(crate) async fn version_handler(State(state): State<AppState>) -> Response {
    let payload = json!({
        "service": {
            "name": "workout-finder",
            "version": env!("CARGO_PKG_VERSION"),
            "crate": CRATE_NAME,
            "config_schema_version": CONFIG_SCHEMA_VERSION,
        },
        "dataset": state.engine.layout(),
        "calendar_zone": state.engine.zone().to_string(),
    });
    let mut response = Json(payload).into_response();
    response
        .headers_mut()
        .insert("cache-control", HeaderValue::from_static("public, max-age=30"));
    response
}

pub(crate) async fn openapi_handler() -> impl IntoResponse {
    Json(openapi_v1_spec())
}
