// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use std::fmt::{Display, Formatter};
use workout_finder_model::{DatasetLayout, Workout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StoreErrorCode {
    OutOfRange,
    Missing,
    Io,
    Decode,
    Oversized,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutOfRange => "shard_out_of_range",
            Self::Missing => "shard_missing",
            Self::Io => "io_error",
            Self::Decode => "decode_error",
            Self::Oversized => "shard_oversized",
        }
    }
}

impl Display for StoreErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn out_of_range(index: usize, layout: &DatasetLayout) -> Self {
        Self::new(
            StoreErrorCode::OutOfRange,
            format!(
                "shard {index} outside 1..={}",
                layout.total_shards()
            ),
        )
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// Read-only access to the numbered shards of one dataset.
///
/// `load_shard` is the strict read and reports every failure. Callers that
/// must not abort on a bad shard go through [`crate::ShardReader`].
#[async_trait]
pub trait ShardStore: Send + Sync {
    fn layout(&self) -> DatasetLayout;

    fn backend_name(&self) -> &'static str;

    async fn load_shard(&self, index: usize) -> Result<Vec<Workout>, StoreError>;
}

/// Shared size check applied by every backend after decoding.
pub(crate) fn check_shard_len(
    index: usize,
    records: &[Workout],
    layout: &DatasetLayout,
) -> Result<(), StoreError> {
    if records.len() > layout.page_size() {
        return Err(StoreError::new(
            StoreErrorCode::Oversized,
            format!(
                "shard {index} holds {} records, page size is {}",
                records.len(),
                layout.page_size()
            ),
        ));
    }
    Ok(())
}
