// SPDX-License-Identifier: Apache-2.0

use crate::command_output_adapters::emit_ok;
use crate::{CatalogArgs, CliError, OutputMode};
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use workout_finder_api::{outcome_body, query_error_to_api, ApiError, ApiErrorCode};
use workout_finder_core::{canonical, MachineError};
use workout_finder_model::{Category, DatasetLayout, SavedFilters, WorkoutId, YearMonth};
use workout_finder_query::{QueryEngine, QueryLimits, WorkoutFilter, WorkoutQuery};
use workout_finder_store::{verify_dataset, LocalFsShardStore, SavedFiltersStore, ShardReader};

fn dataset_store(catalog: &CatalogArgs) -> Result<LocalFsShardStore, CliError> {
    let layout = DatasetLayout::new(catalog.page_size, catalog.total_shards)
        .map_err(|e| CliError::invalid_input(&e.to_string()))?;
    Ok(LocalFsShardStore::new(catalog.data_dir.clone(), layout)
        .with_file_prefix(catalog.shard_file_prefix.clone()))
}

fn open_engine(catalog: &CatalogArgs) -> Result<QueryEngine, CliError> {
    let store = dataset_store(catalog)?;
    Ok(QueryEngine::new(
        ShardReader::new(Arc::new(store)),
        catalog.calendar_zone,
        QueryLimits::default(),
    ))
}

fn api_error_to_cli(err: ApiError) -> CliError {
    let code = match err.code {
        ApiErrorCode::InvalidQueryParameter | ApiErrorCode::PageOutOfRange => "invalid_input",
        ApiErrorCode::WorkoutNotFound => "not_found",
        _ => "internal_error",
    };
    let mut machine = MachineError::new(code, &err.message);
    if let Value::Object(details) = &err.details {
        for (key, value) in details {
            let text = value
                .as_str()
                .map_or_else(|| value.to_string(), ToString::to_string);
            machine = machine.with_detail(key, &text);
        }
    }
    CliError::from_machine(machine)
}

async fn run_query(
    engine: &QueryEngine,
    query: &WorkoutQuery,
    output_mode: OutputMode,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let outcome = engine.execute(query).await.map_err(|err| {
        let mut api = query_error_to_api(&err);
        api.message = err.message.clone();
        api_error_to_cli(api)
    })?;
    let body = outcome_body(outcome, query.id.as_ref()).map_err(api_error_to_cli)?;
    let failures = engine.diagnostics().failures();
    if failures > 0 {
        info!(failures, "some shards were unreadable and read as empty");
    }
    emit_ok(out, output_mode, &body)
}

pub(crate) async fn run_page(
    catalog: &CatalogArgs,
    page: usize,
    output_mode: OutputMode,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let engine = open_engine(catalog)?;
    run_query(&engine, &WorkoutQuery::page(page), output_mode, out).await
}

pub(crate) async fn run_get(
    catalog: &CatalogArgs,
    raw_id: &str,
    output_mode: OutputMode,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let id = WorkoutId::parse(raw_id).map_err(|e| CliError::invalid_input(&e.to_string()))?;
    let engine = open_engine(catalog)?;
    run_query(&engine, &WorkoutQuery::by_id(id), output_mode, out).await
}

/// Builds the engine filter from the stored string form. Blank entries are
/// ignored the same way the HTTP boundary ignores empty parameters.
fn filter_from_saved(saved: &SavedFilters) -> Result<WorkoutFilter, CliError> {
    let start = saved.start_date.trim();
    let month = if start.is_empty() {
        None
    } else {
        Some(YearMonth::parse(start).map_err(|e| {
            CliError::from_machine(
                MachineError::new("invalid_input", &e.to_string())
                    .with_detail("parameter", "startDate"),
            )
        })?)
    };
    let mut categories = Vec::new();
    for raw in saved.categories.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
        categories.push(Category::parse(raw).map_err(|e| {
            CliError::from_machine(
                MachineError::new("invalid_input", &e.to_string())
                    .with_detail("parameter", "category"),
            )
        })?);
    }
    Ok(WorkoutFilter::new(month, categories))
}

pub(crate) async fn run_filter(
    catalog: &CatalogArgs,
    start_date: String,
    categories: Vec<String>,
    page: usize,
    output_mode: OutputMode,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let saved = SavedFilters {
        current_page: page,
        start_date,
        categories,
    };
    let filter = filter_from_saved(&saved)?;
    let engine = open_engine(catalog)?;
    run_query(&engine, &WorkoutQuery::filtered(page, filter), output_mode, out).await?;

    let state = SavedFiltersStore::new(catalog.state_dir.clone());
    state
        .save(&saved)
        .map_err(|e| CliError::internal(format!("failed to save filter state: {e}")))?;
    debug!(path = %state.path().display(), "filter state saved");
    Ok(())
}

pub(crate) async fn run_resume(
    catalog: &CatalogArgs,
    output_mode: OutputMode,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let saved = SavedFiltersStore::new(catalog.state_dir.clone())
        .load()
        .unwrap_or_default();
    let filter = filter_from_saved(&saved)?;
    let engine = open_engine(catalog)?;
    run_query(
        &engine,
        &WorkoutQuery::filtered(saved.page(), filter),
        output_mode,
        out,
    )
    .await
}

pub(crate) fn run_forget(
    catalog: &CatalogArgs,
    output_mode: OutputMode,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let state = SavedFiltersStore::new(catalog.state_dir.clone());
    state
        .clear()
        .map_err(|e| CliError::internal(format!("failed to clear filter state: {e}")))?;
    emit_ok(
        out,
        output_mode,
        &json!({"command": "forget", "status": "ok", "path": state.path()}),
    )
}

pub(crate) async fn run_verify(
    catalog: &CatalogArgs,
    output_mode: OutputMode,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let store = dataset_store(catalog)?;
    let report = verify_dataset(&store).await;
    let payload = serde_json::to_value(&report)
        .map_err(|e| CliError::internal(format!("failed to encode report: {e}")))?;
    emit_ok(out, output_mode, &payload)?;
    if report.is_healthy() {
        return Ok(());
    }
    let problems = report.shards.iter().filter(|s| s.problem.is_some()).count();
    Err(CliError::from_machine(
        MachineError::new("validation", "dataset verification failed")
            .with_detail("shards_with_problems", &problems.to_string())
            .with_detail("duplicate_ids", &report.duplicate_ids.len().to_string())
            .with_detail("records_found", &report.records_found.to_string()),
    ))
}

pub(crate) fn run_openapi(
    target: Option<PathBuf>,
    output_mode: OutputMode,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let spec = workout_finder_api::openapi_v1_spec();
    let Some(target) = target else {
        return emit_ok(out, output_mode, &spec);
    };
    let bytes = canonical::stable_json_bytes(&spec).map_err(|e| CliError::internal(e.to_string()))?;
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CliError::internal(e.to_string()))?;
    }
    std::fs::write(&target, bytes)
        .map_err(|e| CliError::internal(format!("failed to write {}: {e}", target.display())))?;
    emit_ok(
        out,
        output_mode,
        &json!({"command": "openapi", "status": "ok", "out": target}),
    )
}
