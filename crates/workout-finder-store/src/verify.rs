// SPDX-License-Identifier: Apache-2.0

use crate::backend::ShardStore;
use serde::Serialize;
use std::collections::HashMap;
use workout_finder_model::DatasetLayout;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShardReport {
    pub index: usize,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetReport {
    pub layout: DatasetLayout,
    pub records_found: usize,
    pub shards: Vec<ShardReport>,
    pub duplicate_ids: Vec<String>,
}

impl DatasetReport {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.duplicate_ids.is_empty()
            && self.records_found == self.layout.total_records()
            && self.shards.iter().all(|s| s.problem.is_none())
    }
}

/// Strict pass over every shard: unreadable shards, short shards (other than
/// the last), and ids repeated across the dataset.
pub async fn verify_dataset(store: &dyn ShardStore) -> DatasetReport {
    let layout = store.layout();
    let mut shards = Vec::with_capacity(layout.total_shards());
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut duplicate_ids = Vec::new();
    let mut records_found = 0;

    for index in layout.shard_indices() {
        match store.load_shard(index).await {
            Ok(records) => {
                records_found += records.len();
                let problem = (records.len() < layout.page_size()
                    && index < layout.total_shards())
                .then(|| {
                    format!(
                        "holds {} records, expected {}",
                        records.len(),
                        layout.page_size()
                    )
                });
                for record in &records {
                    let count = seen.entry(record.id.as_str().to_string()).or_insert(0);
                    *count += 1;
                    if *count == 2 {
                        duplicate_ids.push(record.id.as_str().to_string());
                    }
                }
                shards.push(ShardReport {
                    index,
                    records: records.len(),
                    problem,
                });
            }
            Err(err) => shards.push(ShardReport {
                index,
                records: 0,
                problem: Some(err.to_string()),
            }),
        }
    }

    duplicate_ids.sort();
    DatasetReport {
        layout,
        records_found,
        shards,
        duplicate_ids,
    }
}
