//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Data source fetches and the table cache
//! - Catalog search
//! - Deep-link resolution

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Data Source
// =============================================================================

/// Source fetches by result.
pub static SOURCE_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_source_fetches_total", "Total data source fetches"),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

/// Source fetch duration in seconds (including table build).
pub static SOURCE_FETCH_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "marquee_source_fetch_duration_seconds",
            "Duration of data source fetches",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
    )
    .unwrap()
});

/// Table cache lookups by result.
pub static CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_cache_lookups_total", "Record table cache lookups"),
        &["result"], // "hit", "miss"
    )
    .unwrap()
});

/// Records in the current table.
pub static TABLE_RECORDS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("marquee_table_records", "Records in the loaded table").unwrap()
});

/// Records shown in the catalog grid (with a cover).
pub static CATALOG_RECORDS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "marquee_catalog_records",
        "Records with a cover in the loaded table",
    )
    .unwrap()
});

// =============================================================================
// Search
// =============================================================================

/// Non-empty searches evaluated.
pub static SEARCHES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("marquee_searches_total", "Total catalog searches evaluated").unwrap()
});

/// Results per search.
pub static SEARCH_RESULTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("marquee_search_results", "Records matched per search")
            .buckets(vec![0.0, 1.0, 5.0, 10.0, 24.0, 50.0, 100.0, 250.0, 500.0]),
    )
    .unwrap()
});

// =============================================================================
// Navigation
// =============================================================================

/// Deep links by outcome.
pub static DEEP_LINKS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_deep_links_total", "Deep links by outcome"),
        &["outcome"], // "valid", "malformed", "not_found"
    )
    .unwrap()
});

/// All core metrics, for registration in the server registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Data source
        Box::new(SOURCE_FETCHES.clone()),
        Box::new(SOURCE_FETCH_DURATION.clone()),
        Box::new(CACHE_LOOKUPS.clone()),
        Box::new(TABLE_RECORDS.clone()),
        Box::new(CATALOG_RECORDS.clone()),
        // Search
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        // Navigation
        Box::new(DEEP_LINKS.clone()),
    ]
}
