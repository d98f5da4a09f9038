//! URL parameters and deep links.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Query parameter carrying the record shown in the detail view.
pub const ITEM_INDEX_PARAM: &str = "item_index";

/// `item_index` is present but not an integer.
///
/// Expected from hand-edited links; recovered silently.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Malformed deep link: item_index={0:?}")]
pub struct MalformedDeepLink(pub String);

/// The query parameters of a session's URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlParams(BTreeMap<String, String>);

impl UrlParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b=two`, with or without a leading `?`.
    ///
    /// Pairs that fail to decode are dropped; later duplicates win.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                let key = decode_component(key)?;
                let value = decode_component(value)?;
                Some((key, value))
            })
            .collect();
        Self(params)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as `?a=1&b=2`, or an empty string when there are no parameters.
    pub fn to_query_string(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("?{}", pairs.join("&"))
    }
}

impl FromIterator<(String, String)> for UrlParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, String>> for UrlParams {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

/// Link that opens the detail view of `index`.
pub fn detail_link(index: u64) -> String {
    format!("?{}={}", ITEM_INDEX_PARAM, index)
}

/// Read the deep link from URL parameters.
///
/// `Ok(None)` when there is no `item_index`.
pub fn parse_deep_link(params: &UrlParams) -> Result<Option<u64>, MalformedDeepLink> {
    match params.get(ITEM_INDEX_PARAM) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| MalformedDeepLink(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_string() {
        let params = UrlParams::parse("?item_index=42&q=hola+mundo&x=%C3%B1");
        assert_eq!(params.get("item_index"), Some("42"));
        assert_eq!(params.get("q"), Some("hola mundo"));
        assert_eq!(params.get("x"), Some("ñ"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_parse_empty_and_bare_keys() {
        assert!(UrlParams::parse("").is_empty());
        assert!(UrlParams::parse("?").is_empty());
        assert_eq!(UrlParams::parse("flag").get("flag"), Some(""));
    }

    #[test]
    fn test_to_query_string() {
        let mut params = UrlParams::new();
        assert_eq!(params.to_query_string(), "");
        params.set(ITEM_INDEX_PARAM, "7");
        params.set("q", "año 1985");
        assert_eq!(params.to_query_string(), "?item_index=7&q=a%C3%B1o%201985");
    }

    #[test]
    fn test_deep_link_absent() {
        assert_eq!(parse_deep_link(&UrlParams::new()), Ok(None));
    }

    #[test]
    fn test_deep_link_valid() {
        let params = UrlParams::parse("item_index=9999");
        assert_eq!(parse_deep_link(&params), Ok(Some(9999)));

        let padded = UrlParams::parse("item_index=%2012%20");
        assert_eq!(parse_deep_link(&padded), Ok(Some(12)));
    }

    #[test]
    fn test_deep_link_malformed() {
        for raw in ["abc", "", "-3", "1.5", "12abc"] {
            let mut params = UrlParams::new();
            params.set(ITEM_INDEX_PARAM, raw);
            assert_eq!(
                parse_deep_link(&params),
                Err(MalformedDeepLink(raw.to_string())),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn test_detail_link() {
        assert_eq!(detail_link(7), "?item_index=7");
    }
}
