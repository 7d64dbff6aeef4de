//! Axum route handlers for the interview wizard.
//!
//! Every transition reads a snapshot, runs on it, and writes it back only if
//! the stored session still has the version that was read.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::answers::AnswerInput;
use crate::models::candidate::CandidateProfile;
use crate::routes::extract::{ApiJson, ApiPath, OptionalJson};
use crate::state::AppState;
use crate::wizard::store::WizardSession;

#[derive(Debug, Default, Deserialize)]
pub struct AnswersRequest {
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<WizardSession>) {
    let session = state.sessions.create().await;
    info!("Session {} created", session.id);
    (StatusCode::CREATED, Json(session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<WizardSession>, AppError> {
    Ok(Json(state.sessions.get(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// POST /api/v1/sessions/:id/info
///
/// Validates the profile and generates the interview. On any failure the
/// stored session stays on the info step.
pub async fn handle_submit_info(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(profile): ApiJson<CandidateProfile>,
) -> Result<Json<WizardSession>, AppError> {
    let session = state.sessions.get(id).await?;
    let read_version = session.version;
    let session = state.wizard.submit_info(session, profile).await?;
    Ok(Json(state.sessions.save(read_version, session).await?))
}

/// PUT /api/v1/sessions/:id/answers
pub async fn handle_save_answers(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<AnswersRequest>,
) -> Result<Json<WizardSession>, AppError> {
    let session = state.sessions.get(id).await?;
    let read_version = session.version;
    let session = state.wizard.save_answers(session, &request.answers)?;
    Ok(Json(state.sessions.save(read_version, session).await?))
}

/// POST /api/v1/sessions/:id/submit
///
/// Body is optional; answers in it are applied before evaluation. A body that
/// is present but not valid JSON is rejected.
pub async fn handle_submit_answers(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    OptionalJson(request): OptionalJson<AnswersRequest>,
) -> Result<Json<WizardSession>, AppError> {
    let request = request.unwrap_or_default();
    let session = state.sessions.get(id).await?;
    let read_version = session.version;
    let session = state.wizard.submit_answers(session, &request.answers).await?;
    Ok(Json(state.sessions.save(read_version, session).await?))
}

/// POST /api/v1/sessions/:id/back
pub async fn handle_back(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<WizardSession>, AppError> {
    let session = state.sessions.get(id).await?;
    let read_version = session.version;
    let session = state.wizard.back(session)?;
    Ok(Json(state.sessions.save(read_version, session).await?))
}

/// POST /api/v1/sessions/:id/restart
pub async fn handle_restart(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<WizardSession>, AppError> {
    let session = state.sessions.get(id).await?;
    let read_version = session.version;
    let session = state.wizard.restart(session);
    Ok(Json(state.sessions.save(read_version, session).await?))
}
