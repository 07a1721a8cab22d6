//! Output endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};

use mpm_common::db;
use mpm_common::models::{parse_prompt_id, Output};
use mpm_common::service;
use mpm_common::validation::CreateOutputRequest;

use super::Success;
use crate::{ApiError, ApiResult, AppState};

/// POST /api/prompts/:id/outputs
pub async fn create_output(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateOutputRequest>, JsonRejection>,
) -> ApiResult<Success<Output>> {
    let prompt_id = parse_prompt_id(&id)?;
    let Json(request) = payload?;
    let output = service::create_output(&state.db, prompt_id, request).await?;
    Ok(Success::created(output))
}

/// GET /api/prompts/:id/outputs
pub async fn list_outputs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Success<Vec<Output>>> {
    let prompt_id = parse_prompt_id(&id)?;
    if !db::prompt_exists(&state.db, prompt_id).await? {
        return Err(ApiError::NotFound(format!("prompt {}", prompt_id)));
    }
    let outputs = db::list_outputs(&state.db, prompt_id).await?;
    Ok(Success::ok(outputs))
}

pub fn output_routes() -> Router<AppState> {
    Router::new().route("/api/prompts/:id/outputs", post(create_output).get(list_outputs))
}
