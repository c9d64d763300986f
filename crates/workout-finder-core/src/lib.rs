// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod canonical;
mod error;

pub use error::{ExitCode, MachineError};

use sha2::{Digest, Sha256};

pub const CRATE_NAME: &str = "workout-finder-core";

pub const ENV_LOG_JSON: &str = "WORKOUT_FINDER_LOG_JSON";
pub const ENV_DATA_DIR: &str = "WORKOUT_FINDER_DATA_DIR";
pub const ENV_PAGE_SIZE: &str = "WORKOUT_FINDER_PAGE_SIZE";
pub const ENV_TOTAL_SHARDS: &str = "WORKOUT_FINDER_TOTAL_SHARDS";
pub const ENV_CALENDAR_ZONE: &str = "WORKOUT_FINDER_CALENDAR_ZONE";
pub const ENV_SHARD_FILE_PREFIX: &str = "WORKOUT_FINDER_SHARD_FILE_PREFIX";
pub const ENV_CACHE_SHARDS: &str = "WORKOUT_FINDER_CACHE_SHARDS";
pub const ENV_MAX_CONCURRENT_SHARD_READS: &str = "WORKOUT_FINDER_MAX_CONCURRENT_SHARD_READS";
pub const ENV_BIND: &str = "WORKOUT_FINDER_BIND";
pub const ENV_MAX_URI_BYTES: &str = "WORKOUT_FINDER_MAX_URI_BYTES";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "WORKOUT_FINDER_REQUEST_TIMEOUT_MS";
pub const ENV_RESPONSE_CACHE_TTL_MS: &str = "WORKOUT_FINDER_RESPONSE_CACHE_TTL_MS";
pub const ENV_SLOW_QUERY_MS: &str = "WORKOUT_FINDER_SLOW_QUERY_MS";
pub const ENV_SHUTDOWN_DRAIN_MS: &str = "WORKOUT_FINDER_SHUTDOWN_DRAIN_MS";

/// Every environment variable the binaries read.
pub const ENV_VARS: [&str; 14] = [
    ENV_LOG_JSON,
    ENV_DATA_DIR,
    ENV_PAGE_SIZE,
    ENV_TOTAL_SHARDS,
    ENV_CALENDAR_ZONE,
    ENV_SHARD_FILE_PREFIX,
    ENV_CACHE_SHARDS,
    ENV_MAX_CONCURRENT_SHARD_READS,
    ENV_BIND,
    ENV_MAX_URI_BYTES,
    ENV_REQUEST_TIMEOUT_MS,
    ENV_RESPONSE_CACHE_TTL_MS,
    ENV_SLOW_QUERY_MS,
    ENV_SHUTDOWN_DRAIN_MS,
];

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
