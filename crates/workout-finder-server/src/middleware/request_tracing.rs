// SPDX-License-Identifier: Apache-2.0

use crate::http::handlers_utilities::with_request_id;
use crate::http::request_tracing::{propagated_request_id, RequestId};
use crate::http::response_contract::api_error_response;
use crate::AppState;
use axum::body::Body;
use axum::extract::{MatchedPath, State};
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{info, Instrument};
use workout_finder_api::ApiError;

/// Opens the `http.request` span, pins the request id, enforces the URI size
/// limit, and records the per-route request counter.
pub(crate) async fn request_tracing_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());
    let request_id = propagated_request_id(request.headers(), &state);

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %method,
        route = %route,
    );

    let started = Instant::now();
    let uri_len = request.uri().to_string().len();
    let response = if uri_len > state.api.max_uri_bytes {
        api_error_response(
            StatusCode::URI_TOO_LONG,
            ApiError::invalid_param("uri", &format!("{uri_len} bytes"))
                .with_request_id(request_id.clone()),
        )
    } else {
        request
            .extensions_mut()
            .insert(RequestId(request_id.clone()));
        next.run(request).instrument(span.clone()).await
    };

    let status = response.status().as_u16();
    state.metrics.observe_request(&route, status);
    span.in_scope(|| {
        info!(
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
    });
    with_request_id(response, &request_id)
}
