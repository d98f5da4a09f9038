//! Browser session API handlers.
//!
//! Each request is one interaction of a viewer: it loads the shared table
//! (cached), applies the change to the session, and returns the new screen.

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use marquee_core::{PageMove, RecordTable, RenderState, Session, UrlParams};

use crate::metrics::SESSION_ACTIONS;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub state: RenderState,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn session_not_found(id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Session not found: {}", id),
        }),
    )
}

fn url_params(query: Option<String>) -> UrlParams {
    query.as_deref().map(UrlParams::parse).unwrap_or_default()
}

/// Apply `change` to a session, then render it against the current table.
async fn act(
    state: &AppState,
    id: &str,
    action: &str,
    change: impl FnOnce(&mut Session, &RecordTable),
) -> Result<Json<RenderState>, ApiError> {
    SESSION_ACTIONS.with_label_values(&[action]).inc();

    let loaded = state.loader().load().await;
    let table: &RecordTable = &loaded.table;
    let today = state.today();
    let page_size = state.page_size();

    state
        .sessions()
        .with_session(id, |session| {
            change(session, table);
            session.render(table, today, page_size, loaded.error.as_ref())
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

fn move_page(
    session: &mut Session,
    state: &AppState,
    table: &RecordTable,
    mv: PageMove,
) {
    if let Err(e) = session.navigate(table, state.today(), state.page_size(), mv) {
        debug!("Ignoring page move: {}", e);
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/sessions[?item_index=N]
///
/// Open a new session at the given URL.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    SESSION_ACTIONS.with_label_values(&["create"]).inc();

    let loaded = state.loader().load().await;
    let mut session = Session::from_url(&url_params(query));
    let render = session.render(
        &loaded.table,
        state.today(),
        state.page_size(),
        loaded.error.as_ref(),
    );
    let session_id = state.sessions().create(session).await;

    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            state: render,
        }),
    )
}

/// GET /api/v1/sessions/{id}/view[?item_index=N]
///
/// A page load: applies any deep link in the URL and renders.
pub async fn view_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<RenderState>, impl IntoResponse> {
    let params = url_params(query);
    act(&state, &id, "view", |session, _| session.load(&params)).await
}

/// POST /api/v1/sessions/{id}/search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<RenderState>, impl IntoResponse> {
    act(&state, &id, "search", |session, _| {
        session.set_query(&request.query);
    })
    .await
}

/// POST /api/v1/sessions/{id}/page/next
pub async fn next_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RenderState>, impl IntoResponse> {
    act(&state, &id, "next_page", |session, table| {
        move_page(session, &state, table, PageMove::Next)
    })
    .await
}

/// POST /api/v1/sessions/{id}/page/previous
pub async fn previous_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RenderState>, impl IntoResponse> {
    act(&state, &id, "previous_page", |session, table| {
        move_page(session, &state, table, PageMove::Previous)
    })
    .await
}

/// POST /api/v1/sessions/{id}/page/{n}
///
/// Jump to a page. Pages outside the current results leave the view as is.
pub async fn jump_to_page(
    State(state): State<Arc<AppState>>,
    Path((id, page)): Path<(String, usize)>,
) -> Result<Json<RenderState>, impl IntoResponse> {
    act(&state, &id, "jump_to_page", |session, table| {
        move_page(session, &state, table, PageMove::JumpTo(page))
    })
    .await
}

/// POST /api/v1/sessions/{id}/items/{index}
///
/// Open the detail view of a record.
pub async fn open_detail(
    State(state): State<Arc<AppState>>,
    Path((id, index)): Path<(String, u64)>,
) -> Result<Json<RenderState>, impl IntoResponse> {
    act(&state, &id, "open_detail", |session, _| session.open_detail(index)).await
}

/// POST /api/v1/sessions/{id}/catalog
pub async fn return_to_catalog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RenderState>, impl IntoResponse> {
    act(&state, &id, "return_to_catalog", |session, _| {
        session.return_to_catalog()
    })
    .await
}

/// DELETE /api/v1/sessions/{id}
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, impl IntoResponse> {
    if state.sessions().remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(&id))
    }
}
