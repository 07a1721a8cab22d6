//! Prompt and output workflows
//!
//! Creation runs in a fixed order: field validation, then the empty-content
//! gate, then scoring, then persistence. Nothing is written unless every
//! check passes.

use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::db::{insert_output, insert_prompt};
use crate::models::{Output, Prompt, DEFAULT_PROMPT_VERSION};
use crate::scoring::score_prompt;
use crate::time::now;
use crate::validation::{CreateOutputRequest, CreatePromptRequest};
use crate::Result;

/// Validate, score and store a new prompt
pub async fn create_prompt(pool: &SqlitePool, request: CreatePromptRequest) -> Result<Prompt> {
    request.validate().into_result()?;

    let quality = score_prompt(&request.content());

    let created_at = now();
    let prompt = Prompt {
        id: Uuid::new_v4(),
        version: DEFAULT_PROMPT_VERSION.to_string(),
        lyrics: request.lyrics,
        style: request.style,
        vocal: request.vocal,
        instrumental: request.instrumental,
        quality_score: quality.score,
        quality_warnings: quality.warnings,
        copy_count: 0,
        last_copied_at: None,
        created_at,
        updated_at: created_at,
    };

    insert_prompt(pool, &prompt).await?;

    info!(
        prompt_id = %prompt.id,
        score = %prompt.quality_score,
        warnings = prompt.quality_warnings.len(),
        "Created prompt"
    );
    Ok(prompt)
}

/// Validate and attach an output to an existing prompt
///
/// Returns `Error::NotFound` when the prompt does not exist.
pub async fn create_output(
    pool: &SqlitePool,
    prompt_id: Uuid,
    request: CreateOutputRequest,
) -> Result<Output> {
    request.validate().into_result()?;

    let output = Output {
        id: Uuid::new_v4(),
        prompt_id,
        audio_url: request.audio_url.trim().to_string(),
        model_version: request.model_version().to_string(),
        generation_params: request.generation_params.unwrap_or_default(),
        created_at: now(),
    };

    insert_output(pool, &output).await?;

    info!(output_id = %output.id, prompt_id = %prompt_id, "Created output");
    Ok(output)
}
