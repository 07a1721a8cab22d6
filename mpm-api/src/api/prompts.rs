//! Prompt endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use mpm_common::db;
use mpm_common::models::{
    parse_prompt_id, CopyStats, Page, Prompt, PromptDetail, PromptListQuery, PromptSummary,
};
use mpm_common::service;
use mpm_common::validation::CreatePromptRequest;

use super::Success;
use crate::{ApiError, ApiResult, AppState};

/// Raw list query string; values are parsed leniently
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub quality_score: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListParams {
    pub fn to_query(&self) -> PromptListQuery {
        PromptListQuery::from_params(
            self.page.as_deref(),
            self.page_size.as_deref(),
            self.quality_score.as_deref(),
            self.sort_by.as_deref(),
            self.sort_order.as_deref(),
        )
    }
}

/// POST /api/prompts
pub async fn create_prompt(
    State(state): State<AppState>,
    payload: Result<Json<CreatePromptRequest>, JsonRejection>,
) -> ApiResult<Success<Prompt>> {
    let Json(request) = payload?;
    let prompt = service::create_prompt(&state.db, request).await?;
    Ok(Success::created(prompt))
}

/// GET /api/prompts
pub async fn list_prompts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Success<Page<PromptSummary>>> {
    let page = db::list_prompts(&state.db, &params.to_query()).await?;
    Ok(Success::ok(page))
}

/// GET /api/prompts/:id
pub async fn get_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Success<PromptDetail>> {
    let id = parse_prompt_id(&id)?;
    let detail = db::get_prompt_detail(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("prompt {}", id)))?;
    Ok(Success::ok(detail))
}

/// POST /api/prompts/:id/copy
pub async fn record_copy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Success<CopyStats>> {
    let id = parse_prompt_id(&id)?;
    let stats = db::record_copy(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("prompt {}", id)))?;

    info!(prompt_id = %id, copy_count = stats.copy_count, "Prompt copied");
    Ok(Success::ok(stats))
}

pub fn prompt_routes() -> Router<AppState> {
    Router::new()
        .route("/api/prompts", post(create_prompt).get(list_prompts))
        .route("/api/prompts/:id", get(get_prompt))
        .route("/api/prompts/:id/copy", post(record_copy))
}
