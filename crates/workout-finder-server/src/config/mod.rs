// SPDX-License-Identifier: Apache-2.0

mod api_config;

pub use api_config::ApiConfig;

use std::path::PathBuf;
use workout_finder_model::{CalendarZone, DatasetLayout, DEFAULT_SHARD_FILE_PREFIX};

pub const CONFIG_SCHEMA_VERSION: &str = "1";

/// Where the dataset lives and how it is read.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    pub layout: DatasetLayout,
    pub shard_file_prefix: String,
    pub cache_shards: bool,
    pub max_concurrent_shard_reads: usize,
    pub calendar_zone: CalendarZone,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            layout: DatasetLayout::default(),
            shard_file_prefix: DEFAULT_SHARD_FILE_PREFIX.to_string(),
            cache_shards: false,
            max_concurrent_shard_reads: 8,
            calendar_zone: CalendarZone::Local,
        }
    }
}

pub fn validate_startup_config_contract(
    api: &ApiConfig,
    catalog: &CatalogConfig,
) -> Result<(), String> {
    if api.max_uri_bytes == 0 {
        return Err("api size limits must be > 0".to_string());
    }
    if api.request_timeout.is_zero() {
        return Err("timeouts must be > 0".to_string());
    }
    if catalog.max_concurrent_shard_reads == 0 {
        return Err("max concurrent shard reads must be > 0".to_string());
    }
    if catalog.shard_file_prefix.is_empty()
        || catalog.shard_file_prefix.contains(['/', '\\'])
    {
        return Err("shard file prefix must be a non-empty file name prefix".to_string());
    }
    if catalog.data_dir.as_os_str().is_empty() {
        return Err("data dir must be set".to_string());
    }
    Ok(())
}
