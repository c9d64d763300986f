// SPDX-License-Identifier: Apache-2.0

use crate::backend::{check_shard_len, ShardStore, StoreError, StoreErrorCode};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use workout_finder_model::{shard_file_name, DatasetLayout, Workout, DEFAULT_SHARD_FILE_PREFIX};

/// Shards stored as `<root>/<prefix><index>.json`, each a JSON array of
/// workout objects.
#[derive(Debug, Clone)]
pub struct LocalFsShardStore {
    root: PathBuf,
    layout: DatasetLayout,
    file_prefix: String,
}

impl LocalFsShardStore {
    #[must_use]
    pub fn new(root: PathBuf, layout: DatasetLayout) -> Self {
        Self {
            root,
            layout,
            file_prefix: DEFAULT_SHARD_FILE_PREFIX.to_string(),
        }
    }

    #[must_use]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn shard_path(&self, index: usize) -> PathBuf {
        self.root.join(shard_file_name(&self.file_prefix, index))
    }
}

#[async_trait]
impl ShardStore for LocalFsShardStore {
    fn layout(&self) -> DatasetLayout {
        self.layout
    }

    fn backend_name(&self) -> &'static str {
        "local_fs"
    }

    async fn load_shard(&self, index: usize) -> Result<Vec<Workout>, StoreError> {
        if !self.layout.contains_shard(index) {
            return Err(StoreError::out_of_range(index, &self.layout));
        }
        let path = self.shard_path(index);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            let code = if e.kind() == ErrorKind::NotFound {
                StoreErrorCode::Missing
            } else {
                StoreErrorCode::Io
            };
            StoreError::new(code, format!("{}: {e}", path.display()))
        })?;
        let records: Vec<Workout> = serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::new(StoreErrorCode::Decode, format!("{}: {e}", path.display()))
        })?;
        check_shard_len(index, &records, &self.layout)?;
        debug!(shard = index, records = records.len(), "shard loaded");
        Ok(records)
    }
}
