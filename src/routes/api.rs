// GET handlers for the JSON API

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::AppState;
use super::error::ApiResult;
use crate::models::RunHistory;
use crate::validate;
use crate::version::{NAME, VERSION};

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(json!({
        "name": NAME,
        "version": VERSION,
    }))
}

#[derive(Deserialize)]
pub(super) struct UnitsQuery {
    /// Comma-separated target units to filter by.
    #[serde(default)]
    targets: String,
}

pub(super) async fn units(
    State(state): State<AppState>,
    Query(q): Query<UnitsQuery>,
) -> ApiResult<impl IntoResponse> {
    let targets: Vec<String> = q
        .targets
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();
    let units = state.systemctl.units_for_targets(&targets).await?;
    Ok(Json(json!({ "units": units })))
}

pub(super) async fn targets(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let targets = state.systemctl.list_targets().await?;
    Ok(Json(json!({ "targets": targets })))
}

pub(super) async fn timers(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let timers = state.systemctl.list_timers().await?;
    Ok(Json(json!({ "timers": timers })))
}

pub(super) async fn schedule(
    State(state): State<AppState>,
    Path(unit): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let schedule = state.systemctl.schedule_for_unit(&unit).await?;
    Ok(Json(schedule))
}

#[derive(Deserialize)]
pub(super) struct LimitQuery {
    limit: Option<u32>,
}

#[derive(Serialize)]
struct RunsResponse {
    unit: String,
    #[serde(flatten)]
    history: RunHistory,
}

pub(super) async fn runs(
    State(state): State<AppState>,
    Path(unit): Path<String>,
    Query(q): Query<LimitQuery>,
) -> ApiResult<impl IntoResponse> {
    validate::unit_name(&unit)?;
    let limit = q.limit.unwrap_or(validate::DEFAULT_RUN_LIMIT);
    validate::limit(limit, validate::MAX_RUN_LIMIT)?;

    let log_unit = state.systemctl.resolve_log_unit(&unit).await?;
    let runs = state.journal.list_runs(&log_unit, limit).await?;
    Ok(Json(RunsResponse {
        unit,
        history: RunHistory { log_unit, runs },
    }))
}

pub(super) async fn logs(
    State(state): State<AppState>,
    Path((unit, invocation)): Path<(String, String)>,
    Query(q): Query<LimitQuery>,
) -> ApiResult<impl IntoResponse> {
    validate::unit_name(&unit)?;
    validate::invocation_id(&invocation)?;
    let limit = q.limit.unwrap_or(validate::DEFAULT_LOG_LIMIT);
    validate::limit(limit, validate::MAX_LOG_LIMIT)?;

    let log_unit = state.systemctl.resolve_log_unit(&unit).await?;
    let text = state
        .journal
        .logs_for_invocation(&log_unit, &invocation, limit)
        .await?;
    Ok(Json(
        json!({ "unit": unit, "invocationId": invocation, "logs": text }),
    ))
}

pub(super) async fn unit_detail(
    State(state): State<AppState>,
    Path(unit): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let detail = state.systemctl.unit_detail(&unit).await?;
    Ok(Json(detail))
}
