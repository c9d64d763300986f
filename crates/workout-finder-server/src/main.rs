// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use workout_finder_core::{
    ENV_BIND, ENV_CACHE_SHARDS, ENV_CALENDAR_ZONE, ENV_DATA_DIR, ENV_LOG_JSON,
    ENV_MAX_CONCURRENT_SHARD_READS, ENV_MAX_URI_BYTES, ENV_PAGE_SIZE, ENV_REQUEST_TIMEOUT_MS,
    ENV_RESPONSE_CACHE_TTL_MS, ENV_SHARD_FILE_PREFIX, ENV_SHUTDOWN_DRAIN_MS, ENV_SLOW_QUERY_MS,
    ENV_TOTAL_SHARDS,
};
use workout_finder_model::{CalendarZone, DatasetLayout, DEFAULT_SHARD_FILE_PREFIX};
use workout_finder_server::{
    build_router, open_catalog, check_catalog, validate_startup_config_contract, ApiConfig,
    AppState, CatalogConfig,
};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("unix signal registration failed; falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool(ENV_LOG_JSON, true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn catalog_config_from_env() -> Result<CatalogConfig, String> {
    let layout = DatasetLayout::new(env_usize(ENV_PAGE_SIZE, 20), env_usize(ENV_TOTAL_SHARDS, 50))
        .map_err(|e| format!("invalid dataset layout: {e}"))?;
    let calendar_zone = match env::var(ENV_CALENDAR_ZONE) {
        Ok(raw) => CalendarZone::parse(&raw)
            .map_err(|e| format!("invalid {ENV_CALENDAR_ZONE}: {e}"))?,
        Err(_) => CalendarZone::Local,
    };
    Ok(CatalogConfig {
        data_dir: PathBuf::from(env::var(ENV_DATA_DIR).unwrap_or_else(|_| "data".to_string())),
        layout,
        shard_file_prefix: env::var(ENV_SHARD_FILE_PREFIX)
            .unwrap_or_else(|_| DEFAULT_SHARD_FILE_PREFIX.to_string()),
        cache_shards: env_bool(ENV_CACHE_SHARDS, false),
        max_concurrent_shard_reads: env_usize(ENV_MAX_CONCURRENT_SHARD_READS, 8),
        calendar_zone,
    })
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr =
        env::var(ENV_BIND).unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let catalog_cfg = catalog_config_from_env()?;
    let api_cfg = ApiConfig {
        max_uri_bytes: env_usize(ENV_MAX_URI_BYTES, 8192),
        request_timeout: env_duration_ms(ENV_REQUEST_TIMEOUT_MS, 5000),
        response_cache_ttl: env_duration_ms(ENV_RESPONSE_CACHE_TTL_MS, 30_000),
        slow_query_threshold: env_duration_ms(ENV_SLOW_QUERY_MS, 200),
    };
    validate_startup_config_contract(&api_cfg, &catalog_cfg)?;

    let engine = open_catalog(&catalog_cfg);
    let state = AppState::with_config(engine.clone(), api_cfg);
    match check_catalog(&engine).await {
        Ok(records) => {
            info!(records, "dataset check succeeded");
            state.ready.store(true, Ordering::Relaxed);
        }
        Err(e) => {
            error!("dataset check failed: {e}");
            state.ready.store(false, Ordering::Relaxed);
        }
    }
    let app = build_router(state.clone());

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("workout-finder-server listening on {bind_addr}");
    let accepting = state.accepting_requests.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            accepting.store(false, Ordering::Relaxed);
            let drain_ms = env_u64(ENV_SHUTDOWN_DRAIN_MS, 1000);
            tokio::time::sleep(Duration::from_millis(drain_ms)).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
