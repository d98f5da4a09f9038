//! Mock tabular source for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::source::{DataSourceError, TabularSource};

/// Mock implementation of the TabularSource trait.
///
/// Provides controllable behavior for testing:
/// - Serve configurable rows (header first)
/// - Count fetches for cache assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::testing::{fixtures, MockSource};
///
/// let source = MockSource::new(fixtures::catalog_rows(50));
/// source.fail_with(DataSourceError::MissingCredential).await;
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    rows: Arc<RwLock<Vec<Vec<String>>>>,
    failure: Arc<RwLock<Option<DataSourceError>>>,
    fetches: AtomicUsize,
}

impl MockSource {
    /// Create a source serving `rows`.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            ..Default::default()
        }
    }

    /// Replace the served rows.
    pub async fn set_rows(&self, rows: Vec<Vec<String>>) {
        *self.rows.write().await = rows;
    }

    /// Make every fetch fail with `error` until cleared.
    pub async fn fail_with(&self, error: DataSourceError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn clear_failure(&self) {
        *self.failure.write().await = None;
    }

    /// Number of fetches so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TabularSource for MockSource {
    async fn fetch_all(&self) -> Result<Vec<Vec<String>>, DataSourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failure.read().await.clone() {
            return Err(error);
        }
        Ok(self.rows.read().await.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
