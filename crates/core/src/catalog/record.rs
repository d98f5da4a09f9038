//! A single catalog entry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Field;
use crate::search::sanitize;

/// One catalog entry, keyed by a stable integer identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Unique identifier from the identifier column.
    pub index: u64,
    /// Release year, 0 when the year cell is missing or not a number.
    pub year: u32,
    /// Every non-blank cell of the row, keyed by header.
    pub fields: BTreeMap<String, String>,
    /// Sanitized values of the searchable fields that are present.
    #[serde(skip)]
    search_text: Vec<String>,
}

impl Record {
    /// Build a record from its identifier and the non-blank cells of its row.
    pub fn new(index: u64, fields: BTreeMap<String, String>) -> Self {
        let year = fields
            .get(Field::Year.header())
            .map(|raw| parse_year(raw))
            .unwrap_or(0);

        let search_text = Field::SEARCHABLE
            .iter()
            .filter_map(|f| fields.get(f.header()))
            .map(|value| sanitize(value))
            .collect();

        Self {
            index,
            year,
            fields,
            search_text,
        }
    }

    /// Value of a known field, if present and non-blank.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.value(field.header())
    }

    /// Value of an arbitrary column, if present and non-blank.
    pub fn value(&self, header: &str) -> Option<&str> {
        self.fields
            .get(header)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Records without a cover are hidden from the catalog grid.
    pub fn has_cover(&self) -> bool {
        self.get(Field::Cover).is_some()
    }

    /// True if any searchable field contains the (already sanitized) keyword.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.search_text.iter().any(|text| text.contains(keyword))
    }
}

/// Coerce a year cell to a non-negative integer.
///
/// Accepts plain integers and integral decimals ("1999.0"); anything else is 0.
pub fn parse_year(raw: &str) -> u32 {
    let raw = raw.trim();
    if let Ok(year) = raw.parse::<u32>() {
        return year;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => {
            v as u32
        }
        _ => 0,
    }
}
