pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::feed::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/profile", get(handlers::handle_get_profile))
        // Feed
        .route("/api/v1/feed", get(handlers::handle_get_feed))
        .route("/api/v1/feed/reset", post(handlers::handle_reset_feed))
        .route(
            "/api/v1/jobs/:id/analyze",
            post(handlers::handle_analyze_job),
        )
        .route("/api/v1/jobs/:id/save", post(handlers::handle_toggle_saved))
        // Settings
        .route(
            "/api/v1/settings",
            get(handlers::handle_get_settings).patch(handlers::handle_patch_settings),
        )
        .route(
            "/api/v1/settings/keywords",
            post(handlers::handle_add_keyword),
        )
        .route(
            "/api/v1/settings/keywords/:keyword",
            delete(handlers::handle_remove_keyword),
        )
        .with_state(state)
}
