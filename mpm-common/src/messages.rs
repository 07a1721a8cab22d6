//! User-facing error messages
//!
//! Translates API error codes and rejected request fields into text suitable
//! for showing to prompt authors, with optional explanations and suggestions.
//! Tables are keyed by error code (`NOT_FOUND`) or by the dotted field path
//! carried in a [`FieldError`] (`instrumental.bpm`).

use serde::Serialize;

use crate::validation::FieldError;

/// Error code or field path → friendly message
const FRIENDLY_MESSAGES: &[(&str, &str)] = &[
    // Error codes
    ("VALIDATION_ERROR", "The submitted data is not in the expected format, please check and retry"),
    ("BAD_REQUEST", "The request data is invalid, please check your input"),
    ("NOT_FOUND", "This prompt could not be found"),
    ("INTERNAL_ERROR", "Something went wrong on our side, please try again later"),
    // Request fields
    ("lyrics", "Please provide lyrics or a style description"),
    ("vocal.gender", "Vocal gender must be male, female or other"),
    ("instrumental.bpm", "BPM must be between 40 and 240"),
    ("audioUrl", "Please provide a valid audio URL"),
    ("generationParams.bpm", "BPM must be between 40 and 240"),
    ("generationParams.temperature", "Temperature must be between 0 and 2"),
];

const EXPLANATIONS: &[(&str, &str)] = &[
    ("NOT_FOUND", "The prompt may have been deleted, or the ID is incorrect"),
    ("lyrics", "A prompt needs lyrics or a style description so the generator has something to work from"),
    ("vocal.gender", "Vocal parameters define the singer's voice characteristics"),
    ("instrumental.bpm", "Instrumental configuration defines the tempo and style of the backing music"),
    ("audioUrl", "Outputs link a prompt to the audio file generated from it"),
    ("generationParams.temperature", "Temperature controls how much variation the generator introduces"),
];

const SUGGESTIONS: &[(&str, &str)] = &[
    ("BAD_REQUEST", "Send a JSON body and use a prompt ID copied from the prompt list"),
    ("NOT_FOUND", "Check the prompt ID or pick the prompt from the list"),
    ("INTERNAL_ERROR", "Try again in a moment"),
    ("lyrics", "Add lyrics with section tags such as [Verse] and [Chorus], or keywords such as \"Pop, Acoustic\""),
    ("vocal.gender", "Use one of: male, female, other"),
    ("instrumental.bpm", "Most songs sit between 60 and 180 BPM"),
    ("audioUrl", "Use a full URL such as https://example.com/audio/take.mp3"),
    ("generationParams.bpm", "Most songs sit between 60 and 180 BPM"),
    ("generationParams.temperature", "Values around 0.7 to 1.0 work well for most prompts"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Friendly message for `key`, falling back to `raw` and then `key` itself
pub fn friendly_message(key: &str, raw: Option<&str>) -> String {
    lookup(FRIENDLY_MESSAGES, key)
        .or(raw)
        .unwrap_or(key)
        .to_string()
}

pub fn explanation(key: &str) -> Option<&'static str> {
    lookup(EXPLANATIONS, key)
}

pub fn suggestion(key: &str) -> Option<&'static str> {
    lookup(SUGGESTIONS, key)
}

/// Error ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

pub fn format_for_display(key: &str, raw: Option<&str>) -> FormattedError {
    FormattedError {
        message: friendly_message(key, raw),
        explanation: explanation(key).map(str::to_string),
        suggestion: suggestion(key).map(str::to_string),
    }
}

/// Display text for a rejected request, driven by its first field error
pub fn format_field_errors(errors: &[FieldError]) -> FormattedError {
    match errors.first() {
        Some(first) => format_for_display(&first.field, Some(&first.message)),
        None => format_for_display("VALIDATION_ERROR", None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code_uses_table() {
        assert_eq!(
            friendly_message("NOT_FOUND", Some("Not found: prompt abc")),
            "This prompt could not be found"
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_raw() {
        assert_eq!(
            friendly_message("vocal.range", Some("range is not supported")),
            "range is not supported"
        );
        assert_eq!(friendly_message("MYSTERY", None), "MYSTERY");
    }

    #[test]
    fn test_field_errors_use_first_field() {
        let formatted = format_field_errors(&[
            FieldError::new("instrumental.bpm", "bpm must be between 40 and 240"),
            FieldError::new("lyrics", "lyrics and style cannot both be empty"),
        ]);
        assert_eq!(formatted.message, "BPM must be between 40 and 240");
        assert!(formatted.explanation.unwrap().contains("tempo"));
        assert!(formatted.suggestion.is_some());
    }

    #[test]
    fn test_empty_field_errors_use_code() {
        let formatted = format_field_errors(&[]);
        assert!(formatted.message.starts_with("The submitted data"));
        assert!(formatted.explanation.is_none());
    }

    #[test]
    fn test_every_request_field_has_a_suggestion() {
        for field in [
            "lyrics",
            "vocal.gender",
            "instrumental.bpm",
            "audioUrl",
            "generationParams.bpm",
            "generationParams.temperature",
        ] {
            assert!(suggestion(field).is_some(), "missing suggestion for {}", field);
            assert_ne!(friendly_message(field, None), field);
        }
    }

    #[test]
    fn test_format_serializes_without_empty_fields() {
        let value = serde_json::to_value(format_for_display("VALIDATION_ERROR", None)).unwrap();
        assert!(value.get("explanation").is_none());
        assert!(value.get("suggestion").is_none());
    }
}
