pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;
use crate::worksheet::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Character API
        .route(
            "/api/v1/characters/:character",
            get(handlers::handle_get_character),
        )
        // Worksheet API
        .route("/api/v1/worksheet", post(handlers::handle_build_worksheet))
        .route(
            "/api/v1/worksheet/preview",
            get(handlers::handle_preview_worksheet),
        )
        // Session
        .route("/api/v1/session", delete(handlers::handle_reset_session))
        .with_state(state)
}
