pub mod protocol;
pub mod rest;
pub mod state;

pub use rest::{
    ask_question_handler, create_session_handler, delete_session_handler, get_session_handler,
    get_sign_handler, health_handler, list_questions_handler, list_signs_handler,
};

use axum::{
    routing::{get, post},
    Router,
};
use rest::ApiDoc;
use state::AppState;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the full application router: the JSON API plus the Swagger UI.
pub fn router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/sessions", post(create_session_handler))
        .route(
            "/sessions/{session_id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .route(
            "/sessions/{session_id}/questions",
            get(list_questions_handler).post(ask_question_handler),
        )
        .route("/signs", get(list_signs_handler))
        .route("/signs/{name}", get(get_sign_handler))
        .route("/health", get(health_handler))
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
