// SPDX-License-Identifier: Apache-2.0

use crate::dto::{WorkoutPageResponseDto, WorkoutResponseDto};
use crate::errors::ApiError;
use serde_json::Value;
use workout_finder_model::WorkoutId;
use workout_finder_query::{QueryError, QueryErrorCode, QueryOutcome};

#[must_use]
pub fn query_error_to_api(err: &QueryError) -> ApiError {
    match (err.code, err.parameter) {
        (QueryErrorCode::InvalidInput, Some("page")) => {
            ApiError::page_out_of_range("", err.message.clone())
        }
        (QueryErrorCode::InvalidInput, parameter) => {
            let mut api = ApiError::invalid_param(parameter.unwrap_or("query"), "");
            api.message = err.message.clone();
            api
        }
        _ => ApiError::internal(err.message.clone()),
    }
}

/// JSON body for a query outcome. A missed point lookup becomes
/// `WorkoutNotFound`.
pub fn outcome_body(outcome: QueryOutcome, id: Option<&WorkoutId>) -> Result<Value, ApiError> {
    let encoded = match outcome {
        QueryOutcome::Found(workout) => serde_json::to_value(WorkoutResponseDto { workout }),
        QueryOutcome::NotFound => {
            return Err(ApiError::workout_not_found(
                id.map(WorkoutId::as_str).unwrap_or_default(),
            ))
        }
        QueryOutcome::Page(page) => serde_json::to_value(WorkoutPageResponseDto::from(page)),
    };
    encoded.map_err(|e| ApiError::internal(format!("response encoding failed: {e}")))
}
