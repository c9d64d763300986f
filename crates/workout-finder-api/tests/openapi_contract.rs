// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;
use workout_finder_api::{openapi_v1_spec, API_ERROR_CODES};
use workout_finder_core::canonical;

#[test]
fn openapi_document_is_deterministic() {
    let a = canonical::stable_json_hash_hex(&openapi_v1_spec()).expect("hash");
    let b = canonical::stable_json_hash_hex(&openapi_v1_spec()).expect("hash");
    assert_eq!(a, b);
}

#[test]
fn openapi_paths_and_component_schemas_are_lexicographically_sorted() {
    let spec = openapi_v1_spec();
    assert_sorted_object(spec.get("paths").expect("paths"));
    assert_sorted_object(&spec["components"]["schemas"]);
}

#[test]
fn workouts_route_documents_its_parameters_and_errors() {
    let spec = openapi_v1_spec();
    let get = &spec["paths"]["/api/workouts"]["get"];
    let names: Vec<&str> = get["parameters"]
        .as_array()
        .expect("parameters")
        .iter()
        .map(|p| p["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["id", "page", "startDate", "category", "pretty"]);
    for status in ["200", "304", "400", "404", "500", "503"] {
        assert!(get["responses"].get(status).is_some(), "missing {status}");
    }

    let codes = spec["components"]["schemas"]["ApiErrorCode"]["enum"]
        .as_array()
        .expect("enum")
        .len();
    assert_eq!(codes, API_ERROR_CODES.len());

    let required: Vec<&str> = spec["components"]["schemas"]["ApiError"]["required"]
        .as_array()
        .expect("required")
        .iter()
        .map(|v| v.as_str().expect("string"))
        .collect();
    assert_eq!(required, vec!["code", "message", "details", "request_id"]);
}

fn assert_sorted_object(value: &Value) {
    let object = value.as_object().expect("json object");
    let observed = object.keys().map(String::as_str).collect::<Vec<_>>();
    let mut sorted = observed.clone();
    sorted.sort_unstable();
    assert_eq!(observed, sorted);
}
