pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::analysis::handlers::handle_jd_analyze;
use crate::chat::handlers::handle_chat;
use crate::state::AppState;

/// JSON request bodies above this size are rejected.
const JSON_BODY_LIMIT: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/jd-analyze", post(handle_jd_analyze))
        .route("/api/chat", post(handle_chat))
        // Everything else is a static asset
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .with_state(state)
}
