//! Stateless scoring endpoints, usable without going through a session.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::evaluation::advisor::{recommend, Recommendation};
use crate::evaluation::grading::GradingScheme;
use crate::evaluation::report::{evaluate, EvaluationResult};
use crate::evaluation::skills::detect_skills;
use crate::models::answers::AnswerSheet;
use crate::routes::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub sheet: AnswerSheet,
    /// Falls back to the configured scheme.
    #[serde(default)]
    pub scheme: Option<GradingScheme>,
    #[serde(default)]
    pub tech_stack: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub evaluation: EvaluationResult,
    pub recommendation: Recommendation,
}

#[derive(Debug, Deserialize)]
pub struct DetectSkillsRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct DetectSkillsResponse {
    pub skills: Vec<String>,
}

/// POST /api/v1/evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let scheme = request.scheme.unwrap_or_else(|| state.wizard.scheme());
    let evaluation = evaluate(&request.sheet, scheme);
    let recommendation = recommend(evaluation.score, &request.tech_stack);
    Ok(Json(EvaluateResponse {
        evaluation,
        recommendation,
    }))
}

/// POST /api/v1/skills/detect
pub async fn handle_detect_skills(
    ApiJson(request): ApiJson<DetectSkillsRequest>,
) -> Result<Json<DetectSkillsResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    Ok(Json(DetectSkillsResponse {
        skills: detect_skills(&request.resume_text),
    }))
}
