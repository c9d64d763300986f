// SPDX-License-Identifier: Apache-2.0

use crate::backend::{ShardStore, StoreError, StoreErrorCode};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::warn;
use workout_finder_model::{DatasetLayout, Workout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardFailure {
    pub index: usize,
    pub code: StoreErrorCode,
    pub message: String,
}

/// Side-channel counters for shard reads. Failures land here and in the log,
/// never in the caller's result.
#[derive(Debug, Default)]
pub struct ShardReadDiagnostics {
    reads: AtomicU64,
    failures: AtomicU64,
    last_failure: Mutex<Option<ShardFailure>>,
}

impl ShardReadDiagnostics {
    #[must_use]
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn last_failure(&self) -> Option<ShardFailure> {
        self.last_failure
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    fn record_failure(&self, index: usize, err: &StoreError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut guard) = self.last_failure.lock() {
            *guard = Some(ShardFailure {
                index,
                code: err.code,
                message: err.message.clone(),
            });
        }
    }
}

/// Lenient shard access used by the query engine: an unreadable shard is
/// logged, counted, and read as empty.
#[derive(Clone)]
pub struct ShardReader {
    store: Arc<dyn ShardStore>,
    diagnostics: Arc<ShardReadDiagnostics>,
}

impl ShardReader {
    #[must_use]
    pub fn new(store: Arc<dyn ShardStore>) -> Self {
        Self {
            store,
            diagnostics: Arc::new(ShardReadDiagnostics::default()),
        }
    }

    #[must_use]
    pub fn layout(&self) -> DatasetLayout {
        self.store.layout()
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn ShardStore> {
        &self.store
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Arc<ShardReadDiagnostics> {
        &self.diagnostics
    }

    pub async fn read_shard(&self, index: usize) -> Vec<Workout> {
        self.diagnostics.reads.fetch_add(1, Ordering::Relaxed);
        let layout = self.store.layout();
        let result = if layout.contains_shard(index) {
            self.store.load_shard(index).await
        } else {
            Err(StoreError::out_of_range(index, &layout))
        };
        match result {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    shard = index,
                    backend = self.store.backend_name(),
                    code = err.code.as_str(),
                    error = %err.message,
                    "shard unreadable; treating as empty"
                );
                self.diagnostics.record_failure(index, &err);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryShardStore;
    use workout_finder_model::{Category, WorkoutId};

    fn workout(id: &str) -> Workout {
        Workout::new(
            WorkoutId::parse(id).expect("id"),
            id,
            "",
            "2025-05-01T00:00:00.000Z",
            Category::parse("c1").expect("category"),
        )
    }

    #[tokio::test]
    async fn unreadable_shard_reads_as_empty_and_is_counted() {
        let layout = DatasetLayout::new(1, 2).expect("layout");
        let store = MemoryShardStore::from_records(layout, vec![workout("a"), workout("b")])
            .with_unreadable(2);
        let reader = ShardReader::new(Arc::new(store));

        assert_eq!(reader.read_shard(1).await.len(), 1);
        assert!(reader.read_shard(2).await.is_empty());
        assert!(reader.read_shard(3).await.is_empty());

        let diagnostics = reader.diagnostics();
        assert_eq!(diagnostics.reads(), 3);
        assert_eq!(diagnostics.failures(), 2);
        let last = diagnostics.last_failure().expect("last failure");
        assert_eq!(last.index, 3);
        assert_eq!(last.code, StoreErrorCode::OutOfRange);
    }
}
