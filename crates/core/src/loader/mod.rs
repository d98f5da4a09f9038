//! Loads the record table from the source and caches it for a fixed TTL.
//!
//! Failures are cached too: once a fetch fails, viewers see the error until
//! the entry expires. There are no retries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::catalog::{RecordTable, TableOptions};
use crate::metrics::{
    CACHE_LOOKUPS, CATALOG_RECORDS, SOURCE_FETCHES, SOURCE_FETCH_DURATION, TABLE_RECORDS,
};
use crate::source::{DataSourceError, TabularSource};

/// Default time a loaded table is served before refetching.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Result of a load: always a table, possibly empty, plus the error that
/// emptied it.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Arc<RecordTable>,
    pub error: Option<DataSourceError>,
    pub fetched_at: DateTime<Utc>,
}

impl LoadedTable {
    pub fn diagnostics(&self) -> LoadDiagnostics {
        LoadDiagnostics {
            total_records: self.table.len(),
            catalog_records: self.table.catalog_len(),
            generation: self.table.generation(),
            fetched_at: self.fetched_at,
            error: self.error.as_ref().map(|e| e.to_string()),
        }
    }
}

/// Row counts and status shown on the diagnostics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoadDiagnostics {
    pub total_records: usize,
    /// Records with a cover, i.e. shown in the grid.
    pub catalog_records: usize,
    pub generation: u64,
    pub fetched_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

struct CacheEntry {
    value: LoadedTable,
    fetched_at: Instant,
}

/// Shared loader; every session reads the same cached table.
pub struct DataLoader {
    source: Arc<dyn TabularSource>,
    options: TableOptions,
    ttl: Duration,
    cache: Mutex<Option<CacheEntry>>,
    generation: AtomicU64,
}

impl DataLoader {
    pub fn new(source: Arc<dyn TabularSource>, options: TableOptions, ttl: Duration) -> Self {
        Self {
            source,
            options,
            ttl,
            cache: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// The cached table, refetching when missing or expired.
    pub async fn load(&self) -> LoadedTable {
        self.load_at(Instant::now()).await
    }

    /// [`DataLoader::load`] against an explicit clock reading.
    pub async fn load_at(&self, now: Instant) -> LoadedTable {
        let mut cache = self.cache.lock().await;

        if let Some(entry) = cache.as_ref() {
            let age = now.saturating_duration_since(entry.fetched_at);
            if age < self.ttl {
                CACHE_LOOKUPS.with_label_values(&["hit"]).inc();
                debug!("Serving cached table (age {:?})", age);
                return entry.value.clone();
            }
            debug!("Cached table expired (age {:?})", age);
        }

        CACHE_LOOKUPS.with_label_values(&["miss"]).inc();
        let value = self.fetch().await;
        *cache = Some(CacheEntry {
            value: value.clone(),
            fetched_at: now,
        });
        value
    }

    /// Drop the cached table so the next load refetches.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    /// The cached value without triggering a fetch.
    pub async fn peek(&self) -> Option<LoadedTable> {
        self.cache.lock().await.as_ref().map(|e| e.value.clone())
    }

    async fn fetch(&self) -> LoadedTable {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let started = Instant::now();
        let result = self
            .source
            .fetch_all()
            .await
            .and_then(|rows| RecordTable::from_rows(rows, &self.options, generation));
        SOURCE_FETCH_DURATION.observe(started.elapsed().as_secs_f64());

        let fetched_at = Utc::now();
        match result {
            Ok(table) => {
                SOURCE_FETCHES.with_label_values(&["success"]).inc();
                TABLE_RECORDS.set(table.len() as i64);
                CATALOG_RECORDS.set(table.catalog_len() as i64);
                info!(
                    "Loaded {} records ({} with cover) from {}",
                    table.len(),
                    table.catalog_len(),
                    self.source.name()
                );
                LoadedTable {
                    table: Arc::new(table),
                    error: None,
                    fetched_at,
                }
            }
            Err(err) => {
                SOURCE_FETCHES.with_label_values(&["failed"]).inc();
                TABLE_RECORDS.set(0);
                CATALOG_RECORDS.set(0);
                warn!("Failed to load catalog from {}: {}", self.source.name(), err);
                LoadedTable {
                    table: Arc::new(RecordTable::empty(generation)),
                    error: Some(err),
                    fetched_at,
                }
            }
        }
    }
}
