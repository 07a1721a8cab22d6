//! Prompt queries

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::db::outputs::list_outputs;
use crate::models::{CopyStats, Page, Prompt, PromptDetail, PromptListQuery, PromptSummary};
use crate::pagination::calculate_pagination;
use crate::time::{format_timestamp, now, parse_timestamp};
use crate::{Error, Result};

const PROMPT_COLUMNS: &str = "p.id, p.version, p.lyrics, p.style, p.vocal, p.instrumental, \
     p.quality_score, p.quality_warnings, p.copy_count, p.last_copied_at, \
     p.created_at, p.updated_at";

/// Persist a fully-built prompt
pub async fn insert_prompt(pool: &SqlitePool, prompt: &Prompt) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO prompts (
            id, version, lyrics, style, vocal, instrumental,
            quality_score, quality_warnings, copy_count, last_copied_at,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(prompt.id.to_string())
    .bind(&prompt.version)
    .bind(&prompt.lyrics)
    .bind(&prompt.style)
    .bind(to_json_column(prompt.vocal.as_ref())?)
    .bind(to_json_column(prompt.instrumental.as_ref())?)
    .bind(prompt.quality_score.as_str())
    .bind(serde_json::to_string(&prompt.quality_warnings)?)
    .bind(prompt.copy_count)
    .bind(prompt.last_copied_at.as_ref().map(format_timestamp))
    .bind(format_timestamp(&prompt.created_at))
    .bind(format_timestamp(&prompt.updated_at))
    .execute(pool)
    .await?;

    debug!(prompt_id = %prompt.id, score = %prompt.quality_score, "Inserted prompt");
    Ok(())
}

pub async fn get_prompt(pool: &SqlitePool, id: Uuid) -> Result<Option<Prompt>> {
    let query = format!("SELECT {} FROM prompts p WHERE p.id = ?", PROMPT_COLUMNS);
    let row = sqlx::query(&query)
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(prompt_from_row).transpose()
}

/// Prompt together with its outputs (newest first)
pub async fn get_prompt_detail(pool: &SqlitePool, id: Uuid) -> Result<Option<PromptDetail>> {
    let Some(prompt) = get_prompt(pool, id).await? else {
        return Ok(None);
    };
    let outputs = list_outputs(pool, id).await?;

    Ok(Some(PromptDetail { prompt, outputs }))
}

pub async fn prompt_exists(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let count: i64 = sqlx::query("SELECT COUNT(*) FROM prompts WHERE id = ?")
        .bind(id.to_string())
        .fetch_one(pool)
        .await?
        .get(0);

    Ok(count > 0)
}

/// One page of prompts with output counts
///
/// Ties on the sort column are broken by insertion order in the same
/// direction, so paging through equal timestamps is stable.
pub async fn list_prompts(pool: &SqlitePool, query: &PromptListQuery) -> Result<Page<PromptSummary>> {
    let filter = match query.quality_score {
        Some(_) => "WHERE p.quality_score = ?",
        None => "",
    };

    let count_sql = format!("SELECT COUNT(*) FROM prompts p {}", filter);
    let mut count_query = sqlx::query(&count_sql);
    if let Some(score) = query.quality_score {
        count_query = count_query.bind(score.as_str());
    }
    let total: i64 = count_query.fetch_one(pool).await?.get(0);

    let pagination = calculate_pagination(total, query.page, query.page_size);

    let direction = query.sort_order.keyword();
    let list_sql = format!(
        "SELECT {columns}, \
         (SELECT COUNT(*) FROM outputs o WHERE o.prompt_id = p.id) AS output_count \
         FROM prompts p {filter} \
         ORDER BY p.{column} {direction}, p.rowid {direction} \
         LIMIT ? OFFSET ?",
        columns = PROMPT_COLUMNS,
        filter = filter,
        column = query.sort_by.column(),
        direction = direction,
    );
    let mut list_query = sqlx::query(&list_sql);
    if let Some(score) = query.quality_score {
        list_query = list_query.bind(score.as_str());
    }
    let rows = list_query
        .bind(pagination.page_size)
        .bind(pagination.offset)
        .fetch_all(pool)
        .await?;

    let items = rows
        .iter()
        .map(|row| {
            Ok(PromptSummary {
                prompt: prompt_from_row(row)?,
                output_count: row.get("output_count"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        total,
        page = pagination.page,
        returned = items.len(),
        "Listed prompts"
    );

    Ok(Page {
        items,
        page: pagination.page,
        page_size: pagination.page_size,
        total,
        total_pages: pagination.total_pages,
    })
}

/// Increment copy tracking; `None` when the prompt does not exist
pub async fn record_copy(pool: &SqlitePool, id: Uuid) -> Result<Option<CopyStats>> {
    let copied_at = format_timestamp(&now());

    let row = sqlx::query(
        r#"
        UPDATE prompts
        SET copy_count = copy_count + 1,
            last_copied_at = ?,
            updated_at = ?
        WHERE id = ?
        RETURNING copy_count, last_copied_at
        "#,
    )
    .bind(&copied_at)
    .bind(&copied_at)
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let last_copied_at: Option<String> = row.get("last_copied_at");
    Ok(Some(CopyStats {
        copy_count: row.get("copy_count"),
        last_copied_at: last_copied_at.as_deref().map(parse_timestamp).transpose()?,
    }))
}

fn prompt_from_row(row: &SqliteRow) -> Result<Prompt> {
    let id: String = row.get("id");
    let quality_score: String = row.get("quality_score");
    let quality_warnings: String = row.get("quality_warnings");
    let last_copied_at: Option<String> = row.get("last_copied_at");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Prompt {
        id: parse_id(&id)?,
        version: row.get("version"),
        lyrics: row.get("lyrics"),
        style: row.get("style"),
        vocal: from_json_column(row.get("vocal"))?,
        instrumental: from_json_column(row.get("instrumental"))?,
        quality_score: quality_score.parse().map_err(Error::Internal)?,
        quality_warnings: serde_json::from_str(&quality_warnings)?,
        copy_count: row.get("copy_count"),
        last_copied_at: last_copied_at.as_deref().map(parse_timestamp).transpose()?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

pub(crate) fn parse_id(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| Error::Internal(format!("Invalid stored id '{}': {}", value, e)))
}

pub(crate) fn to_json_column<T: Serialize>(value: Option<&T>) -> Result<Option<String>> {
    value.map(serde_json::to_string).transpose().map_err(Error::from)
}

pub(crate) fn from_json_column<T: DeserializeOwned>(value: Option<String>) -> Result<Option<T>> {
    value
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .map_err(Error::from)
}
