// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidQueryParameter,
    PageOutOfRange,
    WorkoutNotFound,
    NotReady,
    Timeout,
    Internal,
}

pub const API_ERROR_CODES: [ApiErrorCode; 6] = [
    ApiErrorCode::InvalidQueryParameter,
    ApiErrorCode::PageOutOfRange,
    ApiErrorCode::WorkoutNotFound,
    ApiErrorCode::NotReady,
    ApiErrorCode::Timeout,
    ApiErrorCode::Internal,
];

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidQueryParameter => "InvalidQueryParameter",
            Self::PageOutOfRange => "PageOutOfRange",
            Self::WorkoutNotFound => "WorkoutNotFound",
            Self::NotReady => "NotReady",
            Self::Timeout => "Timeout",
            Self::Internal => "Internal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        code: ApiErrorCode,
        message: impl Into<String>,
        details: Value,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: request_id.into(),
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"field_errors":[{"parameter": name, "reason": "invalid", "value": value}]}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn page_out_of_range(value: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::PageOutOfRange,
            "Invalid page number",
            json!({"parameter": "page", "value": value, "reason": reason.into()}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn workout_not_found(id: &str) -> Self {
        Self::new(
            ApiErrorCode::WorkoutNotFound,
            "Workout not found",
            json!({"id": id}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn not_ready(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::NotReady,
            "service not ready",
            json!({"reason": reason}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::new(
            ApiErrorCode::Timeout,
            "request timed out",
            json!({"timeout_ms": timeout_ms}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::Internal,
            "Internal server error",
            json!({"cause": message.into()}),
            "req-unknown",
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}
