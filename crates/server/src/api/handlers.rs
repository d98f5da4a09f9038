use axum::{extract::State, http::header, response::IntoResponse, Json};
use marquee_core::{LoadDiagnostics, SanitizedConfig};
use serde::Serialize;
use std::sync::Arc;

use crate::metrics::{collect_dynamic_metrics, encode_metrics};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

#[derive(Serialize)]
pub struct DiagnosticsResponse {
    pub source: &'static str,
    pub cache_ttl_secs: u64,
    pub sessions: usize,
    pub table: LoadDiagnostics,
}

/// GET /api/v1/diagnostics
///
/// Row counts and the last load error of the shared table.
pub async fn diagnostics(State(state): State<Arc<AppState>>) -> Json<DiagnosticsResponse> {
    let loaded = state.loader().load().await;
    Json(DiagnosticsResponse {
        source: state.loader().source_name(),
        cache_ttl_secs: state.loader().ttl().as_secs(),
        sessions: state.sessions().len().await,
        table: loaded.diagnostics(),
    })
}

/// GET /metrics
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    collect_dynamic_metrics(&state).await;
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        encode_metrics(),
    )
}
