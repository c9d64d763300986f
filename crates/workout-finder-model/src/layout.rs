// SPDX-License-Identifier: Apache-2.0

use crate::ValidationError;
use serde::Serialize;
use std::ops::{Range, RangeInclusive};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_TOTAL_SHARDS: usize = 50;
pub const DEFAULT_SHARD_FILE_PREFIX: &str = "workouts-page-";

/// Shape of the sharded dataset.
///
/// Page size and shard count are configured together; the record total is
/// always derived from them so the three numbers cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetLayout {
    page_size: usize,
    total_shards: usize,
    total_records: usize,
}

impl DatasetLayout {
    pub fn new(page_size: usize, total_shards: usize) -> Result<Self, ValidationError> {
        if page_size == 0 {
            return Err(ValidationError("page size must be > 0".to_string()));
        }
        if total_shards == 0 {
            return Err(ValidationError("total shards must be > 0".to_string()));
        }
        let total_records = page_size.checked_mul(total_shards).ok_or_else(|| {
            ValidationError(format!(
                "dataset of {total_shards} shards x {page_size} records overflows"
            ))
        })?;
        Ok(Self {
            page_size,
            total_shards,
            total_records,
        })
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn total_shards(&self) -> usize {
        self.total_shards
    }

    #[must_use]
    pub const fn total_records(&self) -> usize {
        self.total_records
    }

    /// Shard indices in scan order.
    #[must_use]
    pub fn shard_indices(&self) -> RangeInclusive<usize> {
        1..=self.total_shards
    }

    #[must_use]
    pub fn contains_shard(&self, index: usize) -> bool {
        (1..=self.total_shards).contains(&index)
    }

    /// Global offsets held by shard `index` (1-based).
    #[must_use]
    pub fn shard_offsets(&self, index: usize) -> Range<usize> {
        let start = index.saturating_sub(1).saturating_mul(self.page_size);
        start..start.saturating_add(self.page_size)
    }

    /// `ceil(items / page_size)`.
    #[must_use]
    pub fn total_pages_for(&self, items: usize) -> usize {
        items.div_ceil(self.page_size)
    }

    /// Slice bounds of 1-based `page` within an arbitrary sequence. Page 0 is
    /// treated like page 1 here; callers validate the page before slicing.
    #[must_use]
    pub fn page_window(&self, page: usize) -> Range<usize> {
        self.shard_offsets(page.max(1))
    }
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            total_shards: DEFAULT_TOTAL_SHARDS,
            total_records: DEFAULT_PAGE_SIZE * DEFAULT_TOTAL_SHARDS,
        }
    }
}

/// File name of shard `index`, e.g. `workouts-page-7.json`.
#[must_use]
pub fn shard_file_name(prefix: &str, index: usize) -> String {
    format!("{prefix}{index}.json")
}
