// SPDX-License-Identifier: Apache-2.0

use crate::config::CatalogConfig;
use std::sync::Arc;
use tracing::info;
use workout_finder_query::{QueryEngine, QueryLimits};
use workout_finder_store::{
    CachedShardStore, LocalFsShardStore, ShardReader, ShardStore, StoreError,
};

/// Builds the query engine over the on-disk dataset described by `cfg`.
#[must_use]
pub fn open_catalog(cfg: &CatalogConfig) -> QueryEngine {
    let local = LocalFsShardStore::new(cfg.data_dir.clone(), cfg.layout)
        .with_file_prefix(cfg.shard_file_prefix.clone());
    let store: Arc<dyn ShardStore> = if cfg.cache_shards {
        Arc::new(CachedShardStore::new(Arc::new(local)))
    } else {
        Arc::new(local)
    };
    info!(
        data_dir = %cfg.data_dir.display(),
        page_size = cfg.layout.page_size(),
        total_shards = cfg.layout.total_shards(),
        cache_shards = cfg.cache_shards,
        calendar_zone = %cfg.calendar_zone,
        "catalog opened"
    );
    QueryEngine::new(
        ShardReader::new(store),
        cfg.calendar_zone,
        QueryLimits {
            max_concurrent_shard_reads: cfg.max_concurrent_shard_reads,
            ..QueryLimits::default()
        },
    )
}

/// Strict read of the first shard, used to decide readiness at startup.
pub async fn check_catalog(engine: &QueryEngine) -> Result<usize, StoreError> {
    let records = engine.reader().store().load_shard(1).await?;
    Ok(records.len())
}
