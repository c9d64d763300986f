// SPDX-License-Identifier: Apache-2.0

use crate::backend::{ShardStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use workout_finder_model::{DatasetLayout, Workout};

/// Memoizes successful shard loads of an immutable dataset. Failures are not
/// cached, so a shard that becomes readable is picked up on the next read.
pub struct CachedShardStore {
    inner: Arc<dyn ShardStore>,
    shards: RwLock<HashMap<usize, Arc<Vec<Workout>>>>,
}

impl CachedShardStore {
    #[must_use]
    pub fn new(inner: Arc<dyn ShardStore>) -> Self {
        Self {
            inner,
            shards: RwLock::new(HashMap::new()),
        }
    }

    pub async fn cached_shard_count(&self) -> usize {
        self.shards.read().await.len()
    }
}

#[async_trait]
impl ShardStore for CachedShardStore {
    fn layout(&self) -> DatasetLayout {
        self.inner.layout()
    }

    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }

    async fn load_shard(&self, index: usize) -> Result<Vec<Workout>, StoreError> {
        if let Some(hit) = self.shards.read().await.get(&index) {
            return Ok(hit.as_ref().clone());
        }
        let records = Arc::new(self.inner.load_shard(index).await?);
        self.shards
            .write()
            .await
            .entry(index)
            .or_insert_with(|| Arc::clone(&records));
        Ok(records.as_ref().clone())
    }
}
