// SPDX-License-Identifier: Apache-2.0

use crate::query_error::QueryError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use workout_finder_model::Workout;
use workout_finder_store::ShardReader;

/// Reads every shard with at most `max_in_flight` reads outstanding and
/// returns the records in shard order, each shard's records in file order.
///
/// Dropping the returned future aborts the outstanding reads.
pub(crate) async fn scan_all(
    reader: &ShardReader,
    max_in_flight: usize,
) -> Result<Vec<Workout>, QueryError> {
    let layout = reader.layout();
    let permits = Arc::new(Semaphore::new(max_in_flight.max(1)));
    let mut tasks = JoinSet::new();
    for index in layout.shard_indices() {
        let reader = reader.clone();
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await.ok();
            (index, reader.read_shard(index).await)
        });
    }

    let mut shards: Vec<Vec<Workout>> = vec![Vec::new(); layout.total_shards()];
    while let Some(joined) = tasks.join_next().await {
        let (index, records) =
            joined.map_err(|e| QueryError::unexpected(format!("shard scan task failed: {e}")))?;
        if let Some(slot) = shards.get_mut(index - 1) {
            *slot = records;
        }
    }
    Ok(shards.into_iter().flatten().collect())
}
