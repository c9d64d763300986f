// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryLimits {
    /// Upper bound on shard reads in flight during one filtered scan.
    pub max_concurrent_shard_reads: usize,
    pub max_categories: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_concurrent_shard_reads: 8,
            max_categories: 32,
        }
    }
}
