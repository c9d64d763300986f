// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod catalog;
mod config;
mod http;
mod metrics;
mod middleware;
mod runtime;
mod state;

pub use catalog::{open_catalog, check_catalog};
pub use config::{validate_startup_config_contract, ApiConfig, CatalogConfig, CONFIG_SCHEMA_VERSION};
pub use metrics::ServerMetrics;
pub use runtime::build_router;
pub use state::AppState;

pub const CRATE_NAME: &str = "workout-finder-server";
