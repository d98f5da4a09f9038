use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::{handlers, middleware::metrics_middleware, sessions};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Frontend static files path (configurable via env)
    let frontend_dir =
        std::env::var("FRONTEND_DIR").unwrap_or_else(|_| "frontend/dist".to_string());

    // API routes
    let api_routes = Router::new()
        // Health, config and diagnostics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/diagnostics", get(handlers::diagnostics))
        // Sessions
        .route("/sessions", post(sessions::create_session))
        .route("/sessions/{id}", delete(sessions::delete_session))
        .route("/sessions/{id}/view", get(sessions::view_session))
        .route("/sessions/{id}/search", post(sessions::search))
        .route("/sessions/{id}/page/next", post(sessions::next_page))
        .route("/sessions/{id}/page/previous", post(sessions::previous_page))
        .route("/sessions/{id}/page/{page}", post(sessions::jump_to_page))
        .route("/sessions/{id}/items/{index}", post(sessions::open_detail))
        .route("/sessions/{id}/catalog", post(sessions::return_to_catalog));

    // Serve frontend with SPA fallback
    let index_path = format!("{}/index.html", frontend_dir);
    let serve_dir = ServeDir::new(&frontend_dir).fallback(ServeFile::new(&index_path));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .fallback_service(serve_dir)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
