// SPDX-License-Identifier: Apache-2.0

use workout_finder_model::{Category, DatasetLayout, Workout, WorkoutId};
use workout_finder_store::{verify_dataset, MemoryShardStore};

fn workout(id: &str) -> Workout {
    Workout::new(
        WorkoutId::parse(id).expect("id"),
        id,
        "",
        "2025-07-01T00:00:00.000Z",
        Category::parse("c4").expect("category"),
    )
}

#[tokio::test]
async fn complete_dataset_is_healthy() {
    let layout = DatasetLayout::new(2, 2).expect("layout");
    let records = ["a", "b", "c", "d"].into_iter().map(workout).collect();
    let report = verify_dataset(&MemoryShardStore::from_records(layout, records)).await;
    assert!(report.is_healthy());
    assert_eq!(report.records_found, 4);
}

#[tokio::test]
async fn report_lists_short_missing_and_duplicate_problems() {
    let layout = DatasetLayout::new(2, 3).expect("layout");
    let store = MemoryShardStore::new(layout)
        .with_shard(1, vec![workout("a"), workout("b")])
        .with_shard(2, vec![workout("b")])
        .with_unreadable(3);
    let report = verify_dataset(&store).await;

    assert!(!report.is_healthy());
    assert_eq!(report.records_found, 3);
    assert_eq!(report.duplicate_ids, vec!["b".to_string()]);
    assert!(report.shards[0].problem.is_none());
    assert!(report.shards[1]
        .problem
        .as_deref()
        .is_some_and(|p| p.contains("holds 1 records")));
    assert!(report.shards[2]
        .problem
        .as_deref()
        .is_some_and(|p| p.starts_with("decode_error")));
}
