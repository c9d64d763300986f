// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod backend;
mod cached;
mod local_fs;
mod memory;
mod reader;
mod saved_filters;
mod verify;

pub use backend::{ShardStore, StoreError, StoreErrorCode};
pub use cached::CachedShardStore;
pub use local_fs::LocalFsShardStore;
pub use memory::MemoryShardStore;
pub use reader::{ShardFailure, ShardReadDiagnostics, ShardReader};
pub use saved_filters::SavedFiltersStore;
pub use verify::{verify_dataset, DatasetReport, ShardReport};

pub const CRATE_NAME: &str = "workout-finder-store";
