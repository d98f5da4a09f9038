//! Helpers for the media columns of a record.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:v=|youtu\.be/)([\w-]+)").expect("static regex is valid")
});

/// Highest value on the scale column.
pub const MAX_SCALE: u8 = 5;

/// Video id of a YouTube watch or short link.
pub fn youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// The 0-5 scale rating of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleRating {
    /// Cell text as entered.
    pub raw: String,
    /// Whole-number level, when the cell is numeric.
    pub level: Option<u8>,
}

impl ScaleRating {
    /// Numeric cells are truncated ("3.7" is 3) and clamped to the scale.
    pub fn parse(raw: &str) -> Self {
        let level = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc().clamp(0.0, MAX_SCALE as f64) as u8);

        Self {
            raw: raw.to_string(),
            level,
        }
    }
}
