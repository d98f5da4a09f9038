//! Free-text catalog search.
//!
//! Queries and field values are sanitized the same way, split into keywords
//! and matched with AND across keywords and OR across the searchable fields.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Record;
use crate::metrics::{SEARCHES_TOTAL, SEARCH_RESULTS};

/// Replace every character that is not alphanumeric or whitespace with a
/// space, then lowercase.
///
/// Diacritics are kept: "Darín" and "darin" are different words.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .to_lowercase()
}

/// A parsed search query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Query text as typed.
    pub raw: String,
    /// Sanitized, non-empty keywords.
    pub keywords: Vec<String>,
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Self {
        let keywords = sanitize(raw)
            .split_whitespace()
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            raw: raw.to_string(),
            keywords,
        }
    }

    /// A query with no keywords matches everything.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// True if every keyword is found in at least one searchable field.
    pub fn matches(&self, record: &Record) -> bool {
        self.keywords.iter().all(|kw| record.matches_keyword(kw))
    }
}

/// Keep the records matching `query`, preserving their order.
pub fn filter<'a, I>(records: I, query: &SearchQuery) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    if query.is_empty() {
        return records.into_iter().collect();
    }

    let matched: Vec<&Record> = records
        .into_iter()
        .filter(|record| query.matches(record))
        .collect();

    SEARCHES_TOTAL.inc();
    SEARCH_RESULTS.observe(matched.len() as f64);
    debug!(
        "Search '{}' ({} keywords) matched {} records",
        query.raw,
        query.keywords.len(),
        matched.len()
    );

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Field;
    use std::collections::BTreeMap;

    fn record(index: u64, cells: &[(Field, &str)]) -> Record {
        let fields: BTreeMap<String, String> = cells
            .iter()
            .map(|(f, v)| (f.header().to_string(), v.to_string()))
            .collect();
        Record::new(index, fields)
    }

    fn sample() -> Vec<Record> {
        vec![
            record(
                7,
                &[
                    (Field::Title, "Esperando la carroza"),
                    (Field::Genre, "Comedy"),
                    (Field::Country, "Argentina"),
                    (Field::Year, "1985"),
                ],
            ),
            record(
                8,
                &[
                    (Field::Title, "Nueve reinas"),
                    (Field::Genre, "Thriller"),
                    (Field::Country, "Argentina"),
                    (Field::Cast, "Ricardo Darín, Gastón Pauls"),
                ],
            ),
            record(
                9,
                &[
                    (Field::Title, "Amores perros"),
                    (Field::Genre, "Drama"),
                    (Field::Country, "México"),
                ],
            ),
        ]
    }

    fn ids(records: &[&Record]) -> Vec<u64> {
        records.iter().map(|r| r.index).collect()
    }

    #[test]
    fn test_sanitize_strips_punctuation_and_lowercases() {
        assert_eq!(sanitize("Darín, Ricardo!"), "darín  ricardo ");
        assert_eq!(sanitize("<b>Sci-Fi</b>"), " b sci fi  b ");
        assert_eq!(sanitize("Ñandú 2"), "ñandú 2");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for text in ["Darín AND comedia", "¿Qué? ¡Sí!", "a_b-c", "", "   "] {
            let once = sanitize(text);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn test_parse_discards_empty_keywords() {
        let q = SearchQuery::parse("  ¡¡ comedia ...  argentina ?? ");
        assert_eq!(q.keywords, vec!["comedia", "argentina"]);
        assert_eq!(q.raw, "  ¡¡ comedia ...  argentina ?? ");

        assert!(SearchQuery::parse("!!! ...").is_empty());
        assert!(SearchQuery::parse("").is_empty());
    }

    #[test]
    fn test_empty_query_is_identity() {
        let records = sample();
        let result = filter(&records, &SearchQuery::parse(""));
        assert_eq!(ids(&result), vec![7, 8, 9]);

        let result = filter(&records, &SearchQuery::parse("?!"));
        assert_eq!(ids(&result), vec![7, 8, 9]);
    }

    #[test]
    fn test_keywords_across_separate_fields() {
        let records = sample();
        let result = filter(&records, &SearchQuery::parse("comedy argentina"));
        assert_eq!(ids(&result), vec![7]);
    }

    #[test]
    fn test_all_keywords_required() {
        let records = sample();
        assert_eq!(ids(&filter(&records, &SearchQuery::parse("argentina"))), vec![7, 8]);
        assert!(filter(&records, &SearchQuery::parse("argentina drama")).is_empty());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let records = sample();
        assert_eq!(ids(&filter(&records, &SearchQuery::parse("DARÍN"))), vec![8]);
        assert_eq!(ids(&filter(&records, &SearchQuery::parse("perr"))), vec![9]);
        assert_eq!(ids(&filter(&records, &SearchQuery::parse("1985"))), vec![7]);
    }

    #[test]
    fn test_no_diacritic_folding() {
        let records = sample();
        assert!(filter(&records, &SearchQuery::parse("darin")).is_empty());
        assert!(filter(&records, &SearchQuery::parse("mexico")).is_empty());
        assert_eq!(ids(&filter(&records, &SearchQuery::parse("méxico"))), vec![9]);
    }

    #[test]
    fn test_punctuation_in_query_is_noise() {
        let records = sample();
        let result = filter(&records, &SearchQuery::parse("\"Darín\", (thriller)"));
        assert_eq!(ids(&result), vec![8]);
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let records = sample();
        let reversed: Vec<&Record> = records.iter().rev().collect();
        let result = filter(reversed, &SearchQuery::parse("a"));
        assert_eq!(ids(&result), vec![9, 8, 7]);
    }

    #[test]
    fn test_resanitized_query_gives_same_result() {
        let records = sample();
        let raw = "Darín, (Thriller)";
        let once = filter(&records, &SearchQuery::parse(raw));
        let twice = filter(&records, &SearchQuery::parse(&sanitize(raw)));
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_results_satisfy_every_keyword() {
        let records = sample();
        let query = SearchQuery::parse("a r");
        for record in filter(&records, &query) {
            for kw in &query.keywords {
                assert!(record.matches_keyword(kw));
            }
        }
    }
}
