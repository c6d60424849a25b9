use std::collections::HashMap;

use crate::{error::ValidationError, types::RecommendationRequest};

pub const FIELD_GENRE: &str = "genre";
pub const FIELD_MIN_TEMPO: &str = "min_tempo";
pub const FIELD_MAX_TEMPO: &str = "max_tempo";
pub const FIELD_TARGET_TEMPO: &str = "target_tempo";
pub const FIELD_MAX_NUM_SONGS: &str = "max_num_songs";

/// Turns raw form fields into a [`RecommendationRequest`].
///
/// `genre`, `target_tempo` and `max_num_songs` are required. The tempo bounds
/// are optional; absent or empty means unset. Tempos are BPM and must not be
/// negative. When both bounds are set the window is normalized by
/// [`normalize_tempo_window`].
pub fn normalize(fields: &HashMap<String, String>) -> Result<RecommendationRequest, ValidationError> {
    let genre = fields
        .get(FIELD_GENRE)
        .map(|g| normalize_genre(g))
        .filter(|g| !g.is_empty())
        .ok_or(ValidationError::Missing { field: FIELD_GENRE })?;

    let target_tempo = required_int(fields, FIELD_TARGET_TEMPO)
        .and_then(|t| non_negative(FIELD_TARGET_TEMPO, t))?;
    let limit = required_int(fields, FIELD_MAX_NUM_SONGS)?;
    let min_tempo = optional_int(fields, FIELD_MIN_TEMPO)?
        .map(|t| non_negative(FIELD_MIN_TEMPO, t))
        .transpose()?;
    let max_tempo = optional_int(fields, FIELD_MAX_TEMPO)?
        .map(|t| non_negative(FIELD_MAX_TEMPO, t))
        .transpose()?;

    let (min_tempo, max_tempo) = normalize_tempo_window(min_tempo, max_tempo);

    Ok(RecommendationRequest {
        genre,
        min_tempo,
        max_tempo,
        target_tempo,
        limit,
    })
}

/// Lowercases and strips every whitespace character: `"Dance Pop"` becomes
/// `"dancepop"`.
pub fn normalize_genre(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Makes a tempo window usable for the recommendations endpoint.
///
/// Only acts when both bounds are set:
/// - equal bounds are widened downwards by one BPM, since an empty window
///   yields no tracks
/// - reversed bounds are swapped
///
/// An already ordered, non-empty window is returned unchanged. Equal bounds
/// of `i32::MIN` cannot be widened and stay as they are; [`normalize`] never
/// gets there because it rejects negative tempos first.
pub fn normalize_tempo_window(min: Option<i32>, max: Option<i32>) -> (Option<i32>, Option<i32>) {
    match (min, max) {
        (Some(min), Some(max)) if min == max => (Some(max.saturating_sub(1)), Some(max)),
        (Some(min), Some(max)) if min > max => (Some(max), Some(min)),
        window => window,
    }
}

fn non_negative(field: &'static str, value: i32) -> Result<i32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

fn required_int(
    fields: &HashMap<String, String>,
    field: &'static str,
) -> Result<i32, ValidationError> {
    optional_int(fields, field)?.ok_or(ValidationError::Missing { field })
}

fn optional_int(
    fields: &HashMap<String, String>,
    field: &'static str,
) -> Result<Option<i32>, ValidationError> {
    let Some(raw) = fields.get(field).map(|v| v.trim()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        })
}
