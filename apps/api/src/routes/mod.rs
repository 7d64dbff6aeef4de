pub mod extract;
pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::evaluation::handlers as evaluation;
use crate::questions::handlers as questions;
use crate::state::AppState;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview wizard
        .route("/api/v1/sessions", post(wizard::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(wizard::handle_get_session).delete(wizard::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/info", post(wizard::handle_submit_info))
        .route(
            "/api/v1/sessions/:id/answers",
            put(wizard::handle_save_answers),
        )
        .route(
            "/api/v1/sessions/:id/submit",
            post(wizard::handle_submit_answers),
        )
        .route("/api/v1/sessions/:id/back", post(wizard::handle_back))
        .route("/api/v1/sessions/:id/restart", post(wizard::handle_restart))
        // Stateless helpers
        .route(
            "/api/v1/questions/parse",
            post(questions::handle_parse_questions),
        )
        .route("/api/v1/evaluate", post(evaluation::handle_evaluate))
        .route(
            "/api/v1/skills/detect",
            post(evaluation::handle_detect_skills),
        )
        .with_state(state)
}
