// SPDX-License-Identifier: Apache-2.0

use crate::backend::{check_shard_len, ShardStore, StoreError, StoreErrorCode};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use workout_finder_model::{DatasetLayout, Workout};

/// In-memory shards, used for tests, benches, and preloaded datasets.
pub struct MemoryShardStore {
    layout: DatasetLayout,
    shards: BTreeMap<usize, Vec<Workout>>,
    unreadable: BTreeSet<usize>,
    read_delay: Option<Duration>,
    load_calls: AtomicU64,
}

impl MemoryShardStore {
    #[must_use]
    pub fn new(layout: DatasetLayout) -> Self {
        Self {
            layout,
            shards: BTreeMap::new(),
            unreadable: BTreeSet::new(),
            read_delay: None,
            load_calls: AtomicU64::new(0),
        }
    }

    /// Splits `records` in order into consecutive shards of `page_size`.
    /// Records beyond the layout's capacity are dropped.
    #[must_use]
    pub fn from_records(layout: DatasetLayout, records: Vec<Workout>) -> Self {
        let mut store = Self::new(layout);
        for (offset, chunk) in records.chunks(layout.page_size()).enumerate() {
            let index = offset + 1;
            if !layout.contains_shard(index) {
                break;
            }
            store.shards.insert(index, chunk.to_vec());
        }
        store
    }

    #[must_use]
    pub fn with_shard(mut self, index: usize, records: Vec<Workout>) -> Self {
        self.shards.insert(index, records);
        self
    }

    /// Makes shard `index` fail every strict read.
    #[must_use]
    pub fn with_unreadable(mut self, index: usize) -> Self {
        self.unreadable.insert(index);
        self
    }

    #[must_use]
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    #[must_use]
    pub fn load_calls(&self) -> u64 {
        self.load_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ShardStore for MemoryShardStore {
    fn layout(&self) -> DatasetLayout {
        self.layout
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn load_shard(&self, index: usize) -> Result<Vec<Workout>, StoreError> {
        self.load_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        if !self.layout.contains_shard(index) {
            return Err(StoreError::out_of_range(index, &self.layout));
        }
        if self.unreadable.contains(&index) {
            return Err(StoreError::new(
                StoreErrorCode::Decode,
                format!("shard {index} marked unreadable"),
            ));
        }
        let records = self.shards.get(&index).cloned().ok_or_else(|| {
            StoreError::new(StoreErrorCode::Missing, format!("shard {index} not loaded"))
        })?;
        check_shard_len(index, &records, &self.layout)?;
        Ok(records)
    }
}
