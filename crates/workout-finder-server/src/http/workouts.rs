// SPDX-License-Identifier: Apache-2.0

use crate::http::handlers_utilities::{etag_matches, if_none_match, put_cache_headers};
use crate::http::request_tracing::{make_request_id, RequestId};
use crate::http::response_contract::error_response;
use crate::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{info, warn};
use workout_finder_api::{outcome_body, parse_list_workouts_params, query_error_to_api, ApiError};
use workout_finder_core::canonical;
use workout_finder_query::QueryMode;

/// `GET /api/workouts`: point lookup, direct page, or filtered page,
/// chosen by which parameters are present.
pub(crate) async fn workouts_handler(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let request_id = request_id
        .map(|Extension(RequestId(id))| id)
        .unwrap_or_else(|| make_request_id(&state));
    if !state.accepting_requests.load(Ordering::Relaxed) {
        return error_response(ApiError::not_ready("draining"), &request_id);
    }

    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            return error_response(
                ApiError::invalid_param("query", &rejection.body_text()),
                &request_id,
            )
        }
    };
    let params = match parse_list_workouts_params(&pairs) {
        Ok(params) => params,
        Err(err) => return error_response(err, &request_id),
    };
    let pretty = params.pretty;
    let id = params.id.clone();
    let page = params.page;
    let query = params.into_query();
    let mode = query.mode();

    let started = Instant::now();
    let timeout = state.api.request_timeout;
    let result = tokio::time::timeout(timeout, state.engine.execute(&query)).await;
    let elapsed = started.elapsed();
    if mode == QueryMode::FilteredPage {
        state.metrics.observe_scan();
    }
    if elapsed > state.api.slow_query_threshold {
        state.metrics.observe_slow_query();
        warn!(
            mode = mode.as_str(),
            page,
            elapsed_ms = elapsed.as_millis() as u64,
            threshold_ms = state.api.slow_query_threshold.as_millis() as u64,
            "slow query"
        );
    }

    let outcome = match result {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(err)) => {
            let mut api = query_error_to_api(&err);
            if err.parameter == Some("page") {
                api.details["value"] = serde_json::Value::String(page.to_string());
            }
            return error_response(api, &request_id);
        }
        Err(_) => {
            state.metrics.observe_timeout();
            warn!(mode = mode.as_str(), timeout_ms = timeout.as_millis() as u64, "query timed out");
            return error_response(
                ApiError::timeout(timeout.as_millis() as u64),
                &request_id,
            );
        }
    };
    let body = match outcome_body(outcome, id.as_ref()) {
        Ok(body) => body,
        Err(err) => return error_response(err, &request_id),
    };

    let etag = match canonical::entity_tag(&body) {
        Ok(etag) => etag,
        Err(e) => {
            return error_response(
                ApiError::internal(format!("etag computation failed: {e}")),
                &request_id,
            )
        }
    };
    if if_none_match(&headers).is_some_and(|v| etag_matches(&v, &etag)) {
        let mut resp = StatusCode::NOT_MODIFIED.into_response();
        put_cache_headers(resp.headers_mut(), state.api.response_cache_ttl, &etag);
        return resp;
    }

    let encoded = if pretty {
        serde_json::to_vec_pretty(&body)
    } else {
        serde_json::to_vec(&body)
    };
    let bytes = match encoded {
        Ok(bytes) => bytes,
        Err(e) => {
            return error_response(
                ApiError::internal(format!("response encoding failed: {e}")),
                &request_id,
            )
        }
    };
    info!(mode = mode.as_str(), page, bytes = bytes.len(), "workouts served");
    let mut resp = ([(header::CONTENT_TYPE, "application/json")], bytes).into_response();
    put_cache_headers(resp.headers_mut(), state.api.response_cache_ttl, &etag);
    resp
}
