pub mod assist;
pub mod health;
pub mod preview;
pub mod sessions;
pub mod templates;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template registry
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route(
            "/api/v1/templates/:id/default",
            get(templates::handle_template_default),
        )
        // Stateless document operations
        .route("/api/v1/validate", post(preview::handle_validate))
        .route("/api/v1/render", post(preview::handle_render))
        .route("/api/v1/export", post(preview::handle_export))
        .route("/api/v1/assist", post(assist::handle_assist))
        // Editor sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_close_session),
        )
        .route("/api/v1/sessions/:id/fields", patch(sessions::handle_set_field))
        .route("/api/v1/sessions/:id/template", put(sessions::handle_set_template))
        .route(
            "/api/v1/sessions/:id/entries/:section",
            post(sessions::handle_add_entry),
        )
        .route(
            "/api/v1/sessions/:id/entries/:section/:entry_id",
            axum::routing::delete(sessions::handle_remove_entry),
        )
        .route(
            "/api/v1/sessions/:id/entries/:section/:entry_id/move",
            post(sessions::handle_move_entry),
        )
        .route("/api/v1/sessions/:id/preview", get(sessions::handle_session_preview))
        .route("/api/v1/sessions/:id/viewport", put(sessions::handle_set_viewport))
        .route("/api/v1/sessions/:id/export", post(sessions::handle_session_export))
        .route("/api/v1/sessions/:id/save", post(sessions::handle_save))
        .route("/api/v1/sessions/:id/feedback", post(sessions::handle_feedback))
        .with_state(state)
}
