// SPDX-License-Identifier: Apache-2.0

//! Deterministic JSON encoding used for response fingerprints.

use serde::Serialize;
use serde_json::Value;

/// Serializes `value` with object keys in lexicographic order at every depth.
pub fn stable_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let raw = serde_json::to_value(value)?;
    serde_json::to_vec(&sort_keys(raw))
}

#[must_use]
pub fn stable_hash_hex(bytes: &[u8]) -> String {
    crate::sha256_hex(bytes)
}

pub fn stable_json_hash_hex<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let bytes = stable_json_bytes(value)?;
    Ok(stable_hash_hex(&bytes))
}

/// Strong HTTP entity tag for a serializable payload.
pub fn entity_tag<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(format!("\"{}\"", stable_json_hash_hex(value)?))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
