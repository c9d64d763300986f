// SPDX-License-Identifier: Apache-2.0

use serde_json::json;
use workout_finder_core::{canonical, sha256_hex};

#[test]
fn stable_json_bytes_ignore_insertion_order() {
    let a = json!({"totalPages": 50, "totalItems": 1000});
    let b = json!({"totalItems": 1000, "totalPages": 50});
    assert_eq!(
        canonical::stable_json_bytes(&a).expect("a"),
        canonical::stable_json_bytes(&b).expect("b")
    );
}

#[test]
fn sha256_matches_known_vector() {
    assert_eq!(
        sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn entity_tag_differs_when_payload_differs() {
    let one = canonical::entity_tag(&json!({"page": 1})).expect("one");
    let two = canonical::entity_tag(&json!({"page": 2})).expect("two");
    assert_ne!(one, two);
    assert_eq!(
        one,
        canonical::entity_tag(&json!({"page": 1})).expect("again")
    );
}
