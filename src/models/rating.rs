//! Rating helpers: records store an optional `f64` in `[0, 10]`.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

static RATING_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}(\.\d?)?$").expect("rating pattern is valid")
});

/// Clamp a rating into the accepted range. Non-finite values are rejected.
pub fn clamp(value: f64) -> AppResult<f64> {
    if !value.is_finite() {
        return Err(AppError::Validation(format!(
            "rating must be a number, got {value}"
        )));
    }
    Ok(value.clamp(MIN_RATING, MAX_RATING))
}

/// Parse a rating typed by the user.
///
/// Empty input means "unrated". Otherwise the text must be a plain decimal
/// number with at most one fractional digit whose value lies in `[0, 10]`
/// (`"8"`, `"8."`, `"8.5"`, `"10"`).
pub fn parse_input(raw: &str) -> AppResult<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if !RATING_INPUT.is_match(raw) {
        return Err(AppError::InvalidRating(raw.to_string()));
    }

    let value: f64 = raw
        .trim_end_matches('.')
        .parse()
        .map_err(|_| AppError::InvalidRating(raw.to_string()))?;

    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(AppError::InvalidRating(raw.to_string()));
    }

    Ok(Some(value))
}
