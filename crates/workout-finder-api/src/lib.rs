// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! HTTP-facing contract of the workout catalog: query-string parsing, error
//! codes and their status mapping, response bodies, and the OpenAPI document.

pub mod convert;
pub mod dto;
pub mod error_mapping;
pub mod errors;
pub mod openapi;
pub mod params;

pub use convert::{outcome_body, query_error_to_api};
pub use dto::{WorkoutPageResponseDto, WorkoutResponseDto};
pub use error_mapping::{map_error, ApiErrorMapping};
pub use errors::{ApiError, ApiErrorCode, API_ERROR_CODES};
pub use openapi::openapi_v1_spec;
pub use params::{parse_list_workouts_params, ListWorkoutsParams};

pub const CRATE_NAME: &str = "workout-finder-api";
pub const WORKOUTS_ROUTE: &str = "/api/workouts";
