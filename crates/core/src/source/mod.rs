//! Tabular data sources.
//!
//! A source returns the whole sheet as strings: the header row first, then
//! the data rows. Type coercion happens in [`crate::catalog::RecordTable`].

mod sheets;

pub use sheets::GoogleSheetsSource;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while fetching or interpreting the source.
///
/// None of these are fatal: the loader reports them to the viewer and serves
/// an empty table until the cache expires.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataSourceError {
    /// No credential configured for the source.
    #[error("No API key configured for the data source")]
    MissingCredential,

    /// The source rejected the credential.
    #[error("Data source rejected the credential: {0}")]
    InvalidCredential(String),

    /// Network failure or timeout.
    #[error("Data source unreachable: {0}")]
    Unreachable(String),

    /// Source returned an error status.
    #[error("Data source error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Source returned a body we could not read.
    #[error("Failed to parse data source response: {0}")]
    Parse(String),

    /// No header row.
    #[error("Data source is empty")]
    Empty,

    /// Header row lacks the identifier column.
    #[error("Required identifier column '{0}' not found")]
    MissingIdColumn(String),

    /// Identifier cell is not a non-negative integer.
    #[error("Row {row}: identifier '{value}' is not an integer")]
    InvalidIdentifier { row: usize, value: String },

    /// Two rows share an identifier.
    #[error("Identifier {0} appears more than once")]
    DuplicateIdentifier(u64),
}

impl From<reqwest::Error> for DataSourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataSourceError::Parse(err.to_string())
        } else {
            DataSourceError::Unreachable(err.to_string())
        }
    }
}

/// A read-only provider of tabular rows.
#[async_trait]
pub trait TabularSource: Send + Sync {
    /// Fetch the header row followed by every data row.
    async fn fetch_all(&self) -> Result<Vec<Vec<String>>, DataSourceError>;

    /// Short name for logs and diagnostics.
    fn name(&self) -> &'static str;
}
