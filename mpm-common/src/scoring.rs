//! Prompt quality scoring
//!
//! Rule-based completeness assessment for music generation prompts.
//!
//! # Components
//! - **Section-tag detector**: counts canonical lyric section markers
//! - **Hard-validator**: rejects prompts with neither lyrics nor style
//! - **Scorer**: accumulates points per field, maps the total to a
//!   [`QualityScore`] and collects improvement warnings
//!
//! # Scoring Scheme
//! | Field        | Condition            | Points |
//! |--------------|----------------------|--------|
//! | lyrics       | ≥3 section markers   | 30     |
//! | lyrics       | 1-2 section markers  | 25     |
//! | lyrics       | no section markers   | 15     |
//! | lyrics       | > 3500 characters    | -5     |
//! | style        | > 50 characters      | 30     |
//! | style        | > 10 characters      | 20     |
//! | style        | otherwise            | 10     |
//! | style        | > 2000 characters    | -5     |
//! | vocal        | present              | 20     |
//! | instrumental | present              | 20     |
//!
//! Total ≥ 70 is `high`, ≥ 25 is `medium`, anything lower (including
//! negative totals) is `low`.
//!
//! The classification is advisory. Only [`validate_prompt_content`] blocks
//! a prompt from being stored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::models::{InstrumentalParams, VocalParams};

/// Canonical lyric section markers
pub const SECTION_MARKERS: [&str; 16] = [
    "[Verse]",
    "[Chorus]",
    "[Bridge]",
    "[Intro]",
    "[Outro]",
    "[Pre-Chorus]",
    "[Hook]",
    "[Break]",
    "[Solo]",
    "[Drop]",
    "[Build-Up]",
    "[Verse 1]",
    "[Verse 2]",
    "[Verse 3]",
    "[Chorus 1]",
    "[Chorus 2]",
];

pub const LYRICS_FULL_BONUS: i32 = 30;
pub const LYRICS_PARTIAL_BONUS: i32 = 25;
pub const LYRICS_BASE_BONUS: i32 = 15;
/// Distinct markers needed for [`LYRICS_FULL_BONUS`]
pub const LYRICS_FULL_MARKER_COUNT: usize = 3;

pub const STYLE_FULL_BONUS: i32 = 30;
pub const STYLE_PARTIAL_BONUS: i32 = 20;
pub const STYLE_BASE_BONUS: i32 = 10;
/// Style must be strictly longer than this for [`STYLE_FULL_BONUS`]
pub const STYLE_FULL_LENGTH: usize = 50;
/// Style must be strictly longer than this for [`STYLE_PARTIAL_BONUS`]
pub const STYLE_PARTIAL_LENGTH: usize = 10;

pub const VOCAL_BONUS: i32 = 20;
pub const INSTRUMENTAL_BONUS: i32 = 20;

/// Soft length limits (characters); exceeding one costs [`LENGTH_PENALTY`]
pub const LYRICS_SOFT_LIMIT: usize = 3500;
pub const STYLE_SOFT_LIMIT: usize = 2000;
pub const LENGTH_PENALTY: i32 = 5;

pub const HIGH_THRESHOLD: i32 = 70;
pub const MEDIUM_THRESHOLD: i32 = 25;

pub const WARN_MISSING_CONTENT: &str = "must provide lyrics or style";
pub const WARN_LYRICS_TOO_LONG: &str = "lyrics exceeds 3500 characters";
pub const WARN_STYLE_TOO_LONG: &str = "style exceeds 2000 characters";
pub const WARN_ADD_LYRICS: &str = "add lyrics to improve generation quality";
pub const WARN_ADD_SECTION_MARKERS: &str =
    "missing section markers, consider using [Verse], [Chorus], etc.";
pub const WARN_ADD_STYLE: &str = "add a style description";
pub const WARN_ADD_VOCAL: &str = "add vocal parameters";
pub const WARN_ADD_INSTRUMENTAL: &str = "add instrumental configuration";

/// Hard-validator failure message
pub const EMPTY_CONTENT_MESSAGE: &str = "lyrics and style cannot both be empty";

/// Tri-level quality classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityScore {
    High,
    Medium,
    Low,
}

impl QualityScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityScore::High => "high",
            QualityScore::Medium => "medium",
            QualityScore::Low => "low",
        }
    }

    /// Map an accumulated point total onto a classification
    pub fn from_points(points: i32) -> Self {
        if points >= HIGH_THRESHOLD {
            QualityScore::High
        } else if points >= MEDIUM_THRESHOLD {
            QualityScore::Medium
        } else {
            QualityScore::Low
        }
    }
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityScore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(QualityScore::High),
            "medium" => Ok(QualityScore::Medium),
            "low" => Ok(QualityScore::Low),
            other => Err(format!("Unknown quality score: {}", other)),
        }
    }
}

/// Scoring input, borrowed from the request or stored prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptContent<'a> {
    pub lyrics: Option<&'a str>,
    pub style: Option<&'a str>,
    pub vocal: Option<&'a VocalParams>,
    pub instrumental: Option<&'a InstrumentalParams>,
}

/// Scorer output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScoreResult {
    pub score: QualityScore,
    /// In check order; one fixed message per failed check
    pub warnings: Vec<String>,
    /// Accumulated points before threshold mapping
    #[serde(skip)]
    pub points: i32,
}

/// Hard-validator rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("lyrics and style cannot both be empty")]
pub struct EmptyContentError;

/// Text counts as provided only when something remains after trimming
fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Count distinct canonical section markers contained in `lyrics`
///
/// Matching is case-insensitive substring containment, so `[chorus]`
/// counts as `[Chorus]`. Each marker counts at most once.
pub fn count_section_markers(lyrics: &str) -> usize {
    if lyrics.is_empty() {
        return 0;
    }
    let haystack = lyrics.to_lowercase();
    SECTION_MARKERS
        .iter()
        .filter(|marker| haystack.contains(&marker.to_lowercase()))
        .count()
}

/// True when `lyrics` contains at least one canonical section marker
pub fn has_section_marker(lyrics: &str) -> bool {
    let haystack = lyrics.to_lowercase();
    SECTION_MARKERS
        .iter()
        .any(|marker| haystack.contains(&marker.to_lowercase()))
}

/// Reject content where both lyrics and style are absent or blank
pub fn validate_prompt_content(
    lyrics: Option<&str>,
    style: Option<&str>,
) -> std::result::Result<(), EmptyContentError> {
    if non_blank(lyrics).is_none() && non_blank(style).is_none() {
        return Err(EmptyContentError);
    }
    Ok(())
}

/// Compute quality classification and improvement warnings
///
/// Total over any input; never fails. Blank lyrics/style are treated as
/// absent.
pub fn score_prompt(content: &PromptContent<'_>) -> QualityScoreResult {
    let lyrics = non_blank(content.lyrics);
    let style = non_blank(content.style);

    if lyrics.is_none() && style.is_none() {
        return QualityScoreResult {
            score: QualityScore::Low,
            warnings: vec![WARN_MISSING_CONTENT.to_string()],
            points: 0,
        };
    }

    let mut points = 0;
    let mut warnings = Vec::new();

    let marker_count = lyrics.map(count_section_markers).unwrap_or(0);
    if let Some(lyrics) = lyrics {
        points += if marker_count >= LYRICS_FULL_MARKER_COUNT {
            LYRICS_FULL_BONUS
        } else if marker_count >= 1 {
            LYRICS_PARTIAL_BONUS
        } else {
            LYRICS_BASE_BONUS
        };

        if lyrics.chars().count() > LYRICS_SOFT_LIMIT {
            points -= LENGTH_PENALTY;
            warnings.push(WARN_LYRICS_TOO_LONG.to_string());
        }
    }

    if let Some(style) = style {
        let length = style.chars().count();
        points += if length > STYLE_FULL_LENGTH {
            STYLE_FULL_BONUS
        } else if length > STYLE_PARTIAL_LENGTH {
            STYLE_PARTIAL_BONUS
        } else {
            STYLE_BASE_BONUS
        };

        if length > STYLE_SOFT_LIMIT {
            points -= LENGTH_PENALTY;
            warnings.push(WARN_STYLE_TOO_LONG.to_string());
        }
    }

    if content.vocal.is_some() {
        points += VOCAL_BONUS;
    }
    if content.instrumental.is_some() {
        points += INSTRUMENTAL_BONUS;
    }

    match lyrics {
        None => warnings.push(WARN_ADD_LYRICS.to_string()),
        Some(_) if marker_count == 0 => warnings.push(WARN_ADD_SECTION_MARKERS.to_string()),
        Some(_) => {}
    }
    if style.is_none() {
        warnings.push(WARN_ADD_STYLE.to_string());
    }
    if content.vocal.is_none() {
        warnings.push(WARN_ADD_VOCAL.to_string());
    }
    if content.instrumental.is_none() {
        warnings.push(WARN_ADD_INSTRUMENTAL.to_string());
    }

    let score = QualityScore::from_points(points);

    debug!(
        points,
        marker_count,
        score = %score,
        warnings = warnings.len(),
        "Prompt quality scored"
    );

    QualityScoreResult {
        score,
        warnings,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocal() -> VocalParams {
        serde_json::from_value(serde_json::json!({
            "gender": "female",
            "timbre": "clear, warm",
            "style": "lyrical"
        }))
        .unwrap()
    }

    fn instrumental() -> InstrumentalParams {
        serde_json::from_value(serde_json::json!({
            "instruments": ["acoustic guitar", "piano"],
            "bpm": 90
        }))
        .unwrap()
    }

    const THREE_SECTIONS: &str = "[Verse 1]\nwandering under the night sky\n\n\
                                  [Chorus]\nstarlight shining bright\n\n\
                                  [Bridge]\nchasing the dream";

    const TWO_SECTIONS: &str = "[Verse 1]\nsimple lyrics\n\n[Chorus]\nthe hook";

    // ---------------------------------------------------------------
    // Section-tag detector
    // ---------------------------------------------------------------

    #[test]
    fn test_count_markers_empty() {
        assert_eq!(count_section_markers(""), 0);
        assert!(!has_section_marker(""));
    }

    #[test]
    fn test_count_markers_distinct() {
        assert_eq!(count_section_markers(THREE_SECTIONS), 3);
        assert_eq!(count_section_markers(TWO_SECTIONS), 2);
    }

    #[test]
    fn test_count_markers_repeated_counts_once() {
        let lyrics = "[Chorus]\nla la\n[Chorus]\nla la\n[Chorus]";
        assert_eq!(count_section_markers(lyrics), 1);
    }

    #[test]
    fn test_count_markers_case_insensitive() {
        assert_eq!(count_section_markers("[verse]\nhello\n[CHORUS]\nworld"), 2);
        assert!(has_section_marker("[pre-chorus] rising"));
    }

    #[test]
    fn test_numbered_marker_does_not_match_bare_marker() {
        // "[Verse]" is not a substring of "[Verse 1]"
        assert_eq!(count_section_markers("[Verse 1] only"), 1);
    }

    #[test]
    fn test_marker_found_mid_line() {
        assert!(has_section_marker("intro text [Hook] more text"));
        assert!(!has_section_marker("Verse and Chorus without brackets"));
    }

    // ---------------------------------------------------------------
    // Hard-validator
    // ---------------------------------------------------------------

    #[test]
    fn test_validate_accepts_lyrics_only() {
        assert!(validate_prompt_content(Some("valid lyrics"), None).is_ok());
    }

    #[test]
    fn test_validate_accepts_style_only() {
        assert!(validate_prompt_content(None, Some("valid style")).is_ok());
    }

    #[test]
    fn test_validate_rejects_both_absent() {
        let err = validate_prompt_content(None, None).unwrap_err();
        assert_eq!(err.to_string(), "lyrics and style cannot both be empty");
    }

    #[test]
    fn test_validate_rejects_empty_strings() {
        assert_eq!(
            validate_prompt_content(Some(""), Some("")),
            Err(EmptyContentError)
        );
    }

    #[test]
    fn test_validate_rejects_whitespace_only() {
        assert_eq!(
            validate_prompt_content(Some("   "), Some("\n\t ")),
            Err(EmptyContentError)
        );
    }

    // ---------------------------------------------------------------
    // Scorer
    // ---------------------------------------------------------------

    #[test]
    fn test_full_prompt_scores_high_without_warnings() {
        let vocal = vocal();
        let instrumental = instrumental();
        let result = score_prompt(&PromptContent {
            lyrics: Some(THREE_SECTIONS),
            style: Some("Pop, Acoustic, Emotional, 80-100 BPM, uplifting mood"),
            vocal: Some(&vocal),
            instrumental: Some(&instrumental),
        });

        assert_eq!(result.score, QualityScore::High);
        assert!(result.warnings.is_empty(), "unexpected: {:?}", result.warnings);
        assert_eq!(result.points, 100);
    }

    #[test]
    fn test_partial_markers_and_short_style_scores_medium() {
        let result = score_prompt(&PromptContent {
            lyrics: Some(TWO_SECTIONS),
            style: Some("Pop style with moderate description"),
            ..Default::default()
        });

        assert_eq!(result.score, QualityScore::Medium);
        assert_eq!(result.points, 45);
        assert!(result.warnings.contains(&WARN_ADD_VOCAL.to_string()));
        assert!(result.warnings.contains(&WARN_ADD_INSTRUMENTAL.to_string()));
        assert!(!result.warnings.contains(&WARN_ADD_SECTION_MARKERS.to_string()));
    }

    #[test]
    fn test_no_markers_with_vocal_scores_medium() {
        let vocal = vocal();
        let result = score_prompt(&PromptContent {
            lyrics: Some("simple lyrics without any markers"),
            style: Some("Pop style with moderate description text here"),
            vocal: Some(&vocal),
            instrumental: None,
        });

        assert_eq!(result.score, QualityScore::Medium);
        assert_eq!(
            result.warnings,
            vec![
                WARN_ADD_SECTION_MARKERS.to_string(),
                WARN_ADD_INSTRUMENTAL.to_string(),
            ]
        );
    }

    #[test]
    fn test_minimal_lyrics_only_scores_low() {
        let result = score_prompt(&PromptContent {
            lyrics: Some("only simple lyrics, no markers"),
            ..Default::default()
        });

        assert_eq!(result.score, QualityScore::Low);
        assert_eq!(
            result.warnings,
            vec![
                WARN_ADD_SECTION_MARKERS.to_string(),
                WARN_ADD_STYLE.to_string(),
                WARN_ADD_VOCAL.to_string(),
                WARN_ADD_INSTRUMENTAL.to_string(),
            ]
        );
    }

    #[test]
    fn test_markers_alone_reach_medium() {
        let result = score_prompt(&PromptContent {
            lyrics: Some("[Verse 1]\nFirst verse\n\n[Chorus]\nChorus text"),
            ..Default::default()
        });

        assert_eq!(result.score, QualityScore::Medium);
        assert_eq!(result.points, MEDIUM_THRESHOLD);
    }

    #[test]
    fn test_style_only_recommends_lyrics() {
        let result = score_prompt(&PromptContent {
            style: Some("Rock"),
            ..Default::default()
        });

        assert_eq!(result.score, QualityScore::Low);
        assert_eq!(result.warnings[0], WARN_ADD_LYRICS);
        assert!(!result.warnings.contains(&WARN_ADD_STYLE.to_string()));
    }

    #[test]
    fn test_long_lyrics_warns_and_penalizes() {
        let long_lyrics = "x".repeat(3600);
        let result = score_prompt(&PromptContent {
            lyrics: Some(&long_lyrics),
            style: Some("Pop"),
            ..Default::default()
        });

        assert!(result.warnings.contains(&WARN_LYRICS_TOO_LONG.to_string()));
        assert_eq!(result.points, LYRICS_BASE_BONUS - LENGTH_PENALTY + STYLE_BASE_BONUS);
        assert_eq!(result.score, QualityScore::Low);
    }

    #[test]
    fn test_lyrics_length_counts_characters_not_bytes() {
        // 1200 three-byte characters: 3600 bytes, well under the soft limit
        let lyrics = "歌".repeat(1200);
        let result = score_prompt(&PromptContent {
            lyrics: Some(&lyrics),
            ..Default::default()
        });

        assert!(!result.warnings.contains(&WARN_LYRICS_TOO_LONG.to_string()));
    }

    #[test]
    fn test_long_style_warns() {
        let long_style = "y".repeat(2100);
        let result = score_prompt(&PromptContent {
            style: Some(&long_style),
            ..Default::default()
        });

        assert!(result.warnings.contains(&WARN_STYLE_TOO_LONG.to_string()));
        assert_eq!(result.points, STYLE_FULL_BONUS - LENGTH_PENALTY);
        assert_eq!(result.score, QualityScore::Medium);
    }

    #[test]
    fn test_length_warnings_precede_recommendations() {
        let long_lyrics = "z".repeat(3501);
        let result = score_prompt(&PromptContent {
            lyrics: Some(&long_lyrics),
            ..Default::default()
        });

        assert_eq!(result.warnings[0], WARN_LYRICS_TOO_LONG);
        assert_eq!(result.warnings[1], WARN_ADD_SECTION_MARKERS);
    }

    #[test]
    fn test_both_absent_short_circuits() {
        let vocal = vocal();
        let result = score_prompt(&PromptContent {
            vocal: Some(&vocal),
            ..Default::default()
        });

        assert_eq!(result.score, QualityScore::Low);
        assert_eq!(result.warnings, vec![WARN_MISSING_CONTENT.to_string()]);
    }

    #[test]
    fn test_both_blank_short_circuits() {
        let result = score_prompt(&PromptContent {
            lyrics: Some("  "),
            style: Some(""),
            ..Default::default()
        });

        assert_eq!(result.score, QualityScore::Low);
        assert_eq!(result.warnings, vec![WARN_MISSING_CONTENT.to_string()]);
    }

    #[test]
    fn test_marker_count_is_monotonic() {
        let style = "Synthwave";
        let inputs = [
            "plain words",
            "[Verse] plain words",
            "[Verse] plain [Chorus] words",
            "[Verse] plain [Chorus] words [Bridge]",
            "[Verse] [Chorus] [Bridge] [Outro] [Intro]",
        ];

        let points: Vec<i32> = inputs
            .iter()
            .map(|lyrics| {
                score_prompt(&PromptContent {
                    lyrics: Some(lyrics),
                    style: Some(style),
                    ..Default::default()
                })
                .points
            })
            .collect();

        assert!(points.windows(2).all(|w| w[0] <= w[1]), "{:?}", points);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let instrumental = instrumental();
        let content = PromptContent {
            lyrics: Some("[Intro] hum"),
            style: Some("Lo-fi hip hop"),
            vocal: None,
            instrumental: Some(&instrumental),
        };

        assert_eq!(score_prompt(&content), score_prompt(&content));
    }

    #[test]
    fn test_threshold_mapping() {
        assert_eq!(QualityScore::from_points(100), QualityScore::High);
        assert_eq!(QualityScore::from_points(HIGH_THRESHOLD), QualityScore::High);
        assert_eq!(QualityScore::from_points(HIGH_THRESHOLD - 1), QualityScore::Medium);
        assert_eq!(QualityScore::from_points(MEDIUM_THRESHOLD), QualityScore::Medium);
        assert_eq!(QualityScore::from_points(MEDIUM_THRESHOLD - 1), QualityScore::Low);
        assert_eq!(QualityScore::from_points(0), QualityScore::Low);
        assert_eq!(QualityScore::from_points(-10), QualityScore::Low);
    }

    #[test]
    fn test_quality_score_string_forms() {
        for score in [QualityScore::High, QualityScore::Medium, QualityScore::Low] {
            assert_eq!(score.as_str().parse::<QualityScore>(), Ok(score));
            assert_eq!(
                serde_json::to_value(score).unwrap(),
                serde_json::Value::String(score.to_string())
            );
        }
        assert!("HIGH".parse::<QualityScore>().is_err());
    }
}
