//! Google Sheets values API client.
//!
//! Reads a range with an API key. The sheet must be shared so the key can
//! read it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::{DataSourceError, TabularSource};
use crate::config::SourceConfig;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// Google Sheets API client.
pub struct GoogleSheetsSource {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
    api_key: Option<String>,
}

impl GoogleSheetsSource {
    /// Create a new Sheets source.
    ///
    /// A missing API key is accepted here and reported by every fetch.
    pub fn new(config: SourceConfig) -> Result<Self, DataSourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| DataSourceError::Unreachable(e.to_string()))?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            spreadsheet_id: config.spreadsheet_id,
            range: config.range,
            api_key: config.api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn values_url(&self) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&self.range)
        )
    }
}

#[async_trait]
impl TabularSource for GoogleSheetsSource {
    async fn fetch_all(&self) -> Result<Vec<Vec<String>>, DataSourceError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(DataSourceError::MissingCredential)?;

        let url = self.values_url();
        debug!("Sheets fetch: spreadsheet='{}', range='{}'", self.spreadsheet_id, self.range);

        let response = self
            .client
            .get(&url)
            .query(&[("key", api_key.as_str()), ("majorDimension", "ROWS")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let range: ValueRange = response.json().await.map_err(|e| {
            DataSourceError::Parse(format!("Failed to parse values response: {}", e))
        })?;

        Ok(range.values.into_iter().map(cells_to_strings).collect())
    }

    fn name(&self) -> &'static str {
        "google_sheets"
    }
}

/// Map a non-success response to an error.
///
/// 401/403 always mean the key was refused. A 400 is a credential problem
/// only when the message is about the key; bad ranges also come back as 400.
fn status_error(status: StatusCode, body: &str) -> DataSourceError {
    let message = error_message(body);
    let key_rejected = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => true,
        StatusCode::BAD_REQUEST => message.to_lowercase().contains("api key"),
        _ => false,
    };

    if key_rejected {
        DataSourceError::InvalidCredential(message)
    } else {
        DataSourceError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Sheets may return numbers or booleans when the render option is not
/// FORMATTED_VALUE; keep them as their textual form.
fn cells_to_strings(row: Vec<serde_json::Value>) -> Vec<String> {
    row.into_iter()
        .map(|cell| match cell {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect()
}

/// Pull `error.message` out of a Google API error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// ============================================================================
// Sheets API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
