//! Output queries

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::db::prompts::{parse_id, prompt_exists};
use crate::models::Output;
use crate::time::{format_timestamp, parse_timestamp};
use crate::{Error, Result};

/// Persist an output; fails with `NotFound` when its prompt is absent
pub async fn insert_output(pool: &SqlitePool, output: &Output) -> Result<()> {
    if !prompt_exists(pool, output.prompt_id).await? {
        return Err(Error::NotFound(format!("prompt {}", output.prompt_id)));
    }

    sqlx::query(
        r#"
        INSERT INTO outputs (id, prompt_id, audio_url, model_version, generation_params, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(output.id.to_string())
    .bind(output.prompt_id.to_string())
    .bind(&output.audio_url)
    .bind(&output.model_version)
    .bind(serde_json::to_string(&output.generation_params)?)
    .bind(format_timestamp(&output.created_at))
    .execute(pool)
    .await?;

    debug!(output_id = %output.id, prompt_id = %output.prompt_id, "Inserted output");
    Ok(())
}

/// Outputs for a prompt, newest first
pub async fn list_outputs(pool: &SqlitePool, prompt_id: Uuid) -> Result<Vec<Output>> {
    let rows = sqlx::query(
        r#"
        SELECT id, prompt_id, audio_url, model_version, generation_params, created_at
        FROM outputs
        WHERE prompt_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(prompt_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(output_from_row).collect()
}

fn output_from_row(row: &SqliteRow) -> Result<Output> {
    let id: String = row.get("id");
    let prompt_id: String = row.get("prompt_id");
    let generation_params: String = row.get("generation_params");
    let created_at: String = row.get("created_at");

    Ok(Output {
        id: parse_id(&id)?,
        prompt_id: parse_id(&prompt_id)?,
        audio_url: row.get("audio_url"),
        model_version: row.get("model_version"),
        generation_params: serde_json::from_str(&generation_params)?,
        created_at: parse_timestamp(&created_at)?,
    })
}
