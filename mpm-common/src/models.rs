//! Domain models
//!
//! JSON field names follow the public API (camelCase). Parameter records
//! keep unknown keys in `extra` so clients can attach fields this service
//! does not interpret.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::scoring::QualityScore;
use crate::{Error, Result};

/// Semantic version assigned to newly created prompts
pub const DEFAULT_PROMPT_VERSION: &str = "1.0.0";

/// Model version recorded on outputs when the client omits one
pub const DEFAULT_MODEL_VERSION: &str = "Music-2.5";

/// Accepted values for [`VocalParams::gender`]
pub const VOCAL_GENDERS: [&str; 3] = ["male", "female", "other"];

/// Audio effects applied to the vocal track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocalEffects {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_tune: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Singer characteristics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocalParams {
    /// One of [`VOCAL_GENDERS`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timbre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<VocalEffects>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Backing track configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentalParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parameters the generator was run with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Stored prompt record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: Uuid,
    pub version: String,
    pub lyrics: Option<String>,
    pub style: Option<String>,
    pub vocal: Option<VocalParams>,
    pub instrumental: Option<InstrumentalParams>,
    pub quality_score: QualityScore,
    pub quality_warnings: Vec<String>,
    pub copy_count: i64,
    pub last_copied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parse a prompt id taken from a URL path segment
pub fn parse_prompt_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| Error::InvalidInput(format!("Invalid prompt ID: {}", raw)))
}

/// List row: prompt plus the number of attached outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSummary {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub output_count: i64,
}

/// Prompt with its outputs, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptDetail {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub outputs: Vec<Output>,
}

/// Generated-audio record attached to a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub id: Uuid,
    pub prompt_id: Uuid,
    pub audio_url: String,
    pub model_version: String,
    pub generation_params: GenerationParams,
    pub created_at: DateTime<Utc>,
}

/// Copy-tracking counters after an increment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyStats {
    pub copy_count: i64,
    pub last_copied_at: Option<DateTime<Utc>>,
}

/// Timestamp column used for list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortBy {
    /// Lenient parse; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "createdAt" => Some(SortBy::CreatedAt),
            "updatedAt" => Some(SortBy::UpdatedAt),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortBy::CreatedAt => "created_at",
            SortBy::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Lenient parse; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Normalized prompt list options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptListQuery {
    /// 1-indexed
    pub page: i64,
    pub page_size: i64,
    pub quality_score: Option<QualityScore>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl PromptListQuery {
    pub const DEFAULT_PAGE_SIZE: i64 = 20;
    pub const MAX_PAGE_SIZE: i64 = 100;

    /// Build options from loosely-typed query values
    ///
    /// Unparseable or unknown values fall back to defaults; `page` is at
    /// least 1 and `page_size` is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn from_params(
        page: Option<&str>,
        page_size: Option<&str>,
        quality_score: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .max(1);
        let page_size = page_size
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .clamp(1, Self::MAX_PAGE_SIZE);

        Self {
            page,
            page_size,
            quality_score: quality_score.and_then(|q| q.parse().ok()),
            sort_by: sort_by.and_then(SortBy::parse).unwrap_or_default(),
            sort_order: sort_order.and_then(SortOrder::parse).unwrap_or_default(),
        }
    }
}

impl Default for PromptListQuery {
    fn default() -> Self {
        Self::from_params(None, None, None, None, None)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}
