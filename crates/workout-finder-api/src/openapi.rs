// SPDX-License-Identifier: Apache-2.0

use crate::errors::API_ERROR_CODES;
use serde_json::{json, Value};

#[must_use]
pub fn openapi_v1_spec() -> Value {
    let error_codes: Vec<&str> = API_ERROR_CODES.iter().map(|c| c.as_str()).collect();
    let error_response = |description: &str| {
        json!({
          "description": description,
          "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiErrorResponse"}}}
        })
    };
    json!({
      "openapi": "3.0.3",
      "info": {
        "title": "workout-finder API",
        "version": "v1"
      },
      "paths": {
        "/api/workouts": {
          "get": {
            "parameters": [
              {"name": "id", "in": "query", "schema": {"type": "string"}, "description": "point lookup; takes precedence over every other parameter"},
              {"name": "page", "in": "query", "schema": {"type": "integer", "minimum": 1, "default": 1}},
              {"name": "startDate", "in": "query", "schema": {"type": "string", "pattern": "^[0-9]{4}-[0-9]{2}$"}, "description": "calendar month YYYY-MM"},
              {"name": "category", "in": "query", "schema": {"type": "array", "items": {"type": "string"}}, "style": "form", "explode": true},
              {"name": "pretty", "in": "query", "schema": {"type": "boolean"}}
            ],
            "responses": {
              "200": {
                "description": "workout page or single workout",
                "content": {"application/json": {"schema": {"oneOf": [
                  {"$ref": "#/components/schemas/WorkoutPage"},
                  {"$ref": "#/components/schemas/WorkoutEnvelope"}
                ]}}}
              },
              "304": {"description": "not modified"},
              "400": error_response("invalid query parameter or page out of range"),
              "404": error_response("workout not found"),
              "500": error_response("internal error"),
              "503": error_response("not ready or timed out")
            }
          }
        },
        "/healthz": {"get": {"responses": {"200": {"description": "ok"}}}},
        "/metrics": {"get": {"responses": {"200": {"description": "plain-text counters"}}}},
        "/readyz": {
          "get": {
            "responses": {
              "200": {"description": "ready"},
              "503": error_response("not ready")
            }
          }
        },
        "/v1/openapi.json": {"get": {"responses": {"200": {"description": "this document"}}}},
        "/v1/version": {"get": {"responses": {"200": {"description": "service version metadata"}}}}
      },
      "components": {
        "schemas": {
          "ApiError": {
            "type": "object",
            "required": ["code", "message", "details", "request_id"],
            "additionalProperties": false,
            "properties": {
              "code": {"$ref": "#/components/schemas/ApiErrorCode"},
              "details": {"type": "object"},
              "message": {"type": "string"},
              "request_id": {"type": "string"}
            }
          },
          "ApiErrorCode": {"type": "string", "enum": error_codes},
          "ApiErrorResponse": {
            "type": "object",
            "required": ["error"],
            "properties": {"error": {"$ref": "#/components/schemas/ApiError"}}
          },
          "Workout": {
            "type": "object",
            "required": ["id", "name", "description", "startDate", "category"],
            "properties": {
              "category": {"type": "string"},
              "description": {"type": "string"},
              "id": {"type": "string"},
              "name": {"type": "string"},
              "startDate": {"type": "string", "format": "date-time"}
            }
          },
          "WorkoutEnvelope": {
            "type": "object",
            "required": ["workout"],
            "properties": {"workout": {"$ref": "#/components/schemas/Workout"}}
          },
          "WorkoutPage": {
            "type": "object",
            "required": ["workouts", "totalPages", "totalItems"],
            "properties": {
              "totalItems": {"type": "integer", "minimum": 0},
              "totalPages": {"type": "integer", "minimum": 0},
              "workouts": {"type": "array", "items": {"$ref": "#/components/schemas/Workout"}}
            }
          }
        }
      }
    })
}
