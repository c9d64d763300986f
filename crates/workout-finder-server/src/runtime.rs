// SPDX-License-Identifier: Apache-2.0

use crate::http;
use crate::middleware::request_tracing::request_tracing_middleware;
use crate::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use workout_finder_api::WORKOUTS_ROUTE;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(WORKOUTS_ROUTE, get(http::workouts::workouts_handler))
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/metrics", get(http::handlers::metrics_handler))
        .route("/v1/openapi.json", get(http::handlers::openapi_handler))
        .route("/v1/version", get(http::handlers::version_handler))
        .layer(from_fn_with_state(state.clone(), request_tracing_middleware))
        .with_state(state)
}
