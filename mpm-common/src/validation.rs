//! Request validation
//!
//! Requests are first deserialized into typed DTOs, then checked by the
//! predicates here. Every failed predicate contributes one [`FieldError`];
//! callers get either [`Validation::Valid`] or the full list of problems.

use http::Uri;
use serde::{Deserialize, Serialize};

use crate::models::{
    GenerationParams, InstrumentalParams, VocalParams, DEFAULT_MODEL_VERSION, VOCAL_GENDERS,
};
use crate::scoring::{validate_prompt_content, PromptContent, EMPTY_CONTENT_MESSAGE};

pub const BPM_MIN: f64 = 40.0;
pub const BPM_MAX: f64 = 240.0;
pub const TEMPERATURE_MIN: f64 = 0.0;
pub const TEMPERATURE_MAX: f64 = 2.0;
pub const AUDIO_URL_MAX_LENGTH: usize = 500;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path into the request body, e.g. `instrumental.bpm`
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of request validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(Vec<FieldError>),
}

impl Validation {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            Validation::Valid
        } else {
            Validation::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// Convert into the common error type for `?` propagation
    pub fn into_result(self) -> crate::Result<()> {
        match self {
            Validation::Valid => Ok(()),
            Validation::Invalid(errors) => Err(crate::Error::Validation(errors)),
        }
    }
}

/// POST /api/prompts body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePromptRequest {
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub vocal: Option<VocalParams>,
    #[serde(default)]
    pub instrumental: Option<InstrumentalParams>,
}

impl CreatePromptRequest {
    /// Scoring view of the request body
    pub fn content(&self) -> PromptContent<'_> {
        PromptContent {
            lyrics: self.lyrics.as_deref(),
            style: self.style.as_deref(),
            vocal: self.vocal.as_ref(),
            instrumental: self.instrumental.as_ref(),
        }
    }

    /// Field checks followed by the empty-content gate
    ///
    /// Lyrics and style lengths are not checked here; the scorer warns on
    /// overlong text instead.
    pub fn validate(&self) -> Validation {
        let mut errors = Vec::new();

        if let Some(vocal) = &self.vocal {
            check_vocal(vocal, &mut errors);
        }
        if let Some(instrumental) = &self.instrumental {
            check_bpm("instrumental.bpm", instrumental.bpm, &mut errors);
        }
        if validate_prompt_content(self.lyrics.as_deref(), self.style.as_deref()).is_err() {
            errors.push(FieldError::new("lyrics", EMPTY_CONTENT_MESSAGE));
        }

        Validation::from_errors(errors)
    }
}

/// POST /api/prompts/:id/outputs body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutputRequest {
    #[serde(default)]
    pub audio_url: String,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub generation_params: Option<GenerationParams>,
}

impl CreateOutputRequest {
    pub fn validate(&self) -> Validation {
        let mut errors = Vec::new();

        let url = self.audio_url.trim();
        if url.is_empty() {
            errors.push(FieldError::new("audioUrl", "audio URL cannot be empty"));
        } else if self.audio_url.chars().count() > AUDIO_URL_MAX_LENGTH {
            errors.push(FieldError::new(
                "audioUrl",
                format!("audio URL exceeds {} characters", AUDIO_URL_MAX_LENGTH),
            ));
        } else if !is_absolute_url(url) {
            errors.push(FieldError::new("audioUrl", "audio URL is not a valid URL"));
        }

        if let Some(params) = &self.generation_params {
            check_bpm("generationParams.bpm", params.bpm, &mut errors);
            if let Some(temperature) = params.temperature {
                if !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&temperature) {
                    errors.push(FieldError::new(
                        "generationParams.temperature",
                        "temperature must be between 0 and 2",
                    ));
                }
            }
        }

        Validation::from_errors(errors)
    }

    /// Model version with the default applied to missing or blank values
    pub fn model_version(&self) -> &str {
        self.model_version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_MODEL_VERSION)
    }
}

fn check_vocal(vocal: &VocalParams, errors: &mut Vec<FieldError>) {
    if let Some(gender) = &vocal.gender {
        if !VOCAL_GENDERS.contains(&gender.as_str()) {
            errors.push(FieldError::new(
                "vocal.gender",
                "gender must be one of male, female, other",
            ));
        }
    }
}

fn check_bpm(field: &str, bpm: Option<f64>, errors: &mut Vec<FieldError>) {
    if let Some(bpm) = bpm {
        if !(BPM_MIN..=BPM_MAX).contains(&bpm) {
            errors.push(FieldError::new(field, "bpm must be between 40 and 240"));
        }
    }
}

/// Absolute URL with both a scheme and a host
fn is_absolute_url(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    match candidate.parse::<Uri>() {
        Ok(uri) => {
            uri.scheme().is_some()
                && uri.host().map(|h| !h.is_empty()).unwrap_or(false)
        }
        Err(_) => false,
    }
}
