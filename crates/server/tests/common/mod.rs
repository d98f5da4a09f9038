//! Common test utilities for in-process API testing with a mock source.
//!
//! This module provides a test fixture that builds the router around a
//! `MockSource`, so sessions can be driven end to end without reaching
//! a real spreadsheet.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use marquee_core::{
    testing::MockSource, CatalogConfig, Config, DataLoader, ServerConfig, SessionsConfig,
    SourceConfig, TableOptions,
};
use marquee_server::state::AppState;

/// Re-export fixtures for test convenience
pub use marquee_core::testing::fixtures;

/// Test fixture for API testing with a controllable record source.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_open_session() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/api/v1/sessions", json!({})).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock source - configure rows and failures
    pub source: Arc<MockSource>,
    /// Shared application state
    pub state: Arc<AppState>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Fixture serving 50 covered records.
    pub async fn new() -> Self {
        Self::with_rows(fixtures::catalog_rows(50)).await
    }

    /// Fixture serving the given sheet rows (header first).
    pub async fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self::with_source(MockSource::new(rows)).await
    }

    /// Fixture around a preconfigured source.
    pub async fn with_source(source: MockSource) -> Self {
        let source = Arc::new(source);

        let config = Config {
            source: SourceConfig {
                spreadsheet_id: "test-sheet".to_string(),
                api_key: Some("test-key".to_string()),
                range: "A:ZZ".to_string(),
                base_url: None,
                timeout_secs: 5,
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            catalog: CatalogConfig::default(),
            sessions: SessionsConfig::default(),
        };

        let loader = Arc::new(DataLoader::new(
            Arc::clone(&source) as Arc<dyn marquee_core::TabularSource>,
            TableOptions {
                id_column: config.catalog.id_column.clone(),
            },
            Duration::from_secs(config.catalog.cache_ttl_secs),
        ));

        let state = Arc::new(AppState::new(config, loader));
        let router = marquee_server::api::create_router(Arc::clone(&state));

        Self {
            router,
            source,
            state,
        }
    }

    /// Open a session and return its id and first render.
    pub async fn open_session(&self, path: &str) -> (String, Value) {
        let response = self.post(path, Value::Null).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        let id = response.body["session_id"]
            .as_str()
            .expect("session_id missing")
            .to_string();
        (id, response.body["state"].clone())
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body (`Value::Null` for none).
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let body = if body.is_null() { None } else { Some(body) };
        self.request("POST", path, body).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a GET request and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Indexes of the cards on a catalog render.
pub fn card_indexes(state: &Value) -> Vec<u64> {
    state["view"]["cards"]
        .as_array()
        .map(|cards| cards.iter().filter_map(|c| c["index"].as_u64()).collect())
        .unwrap_or_default()
}
