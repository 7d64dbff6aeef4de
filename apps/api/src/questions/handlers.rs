use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::prompts::strip_code_fences;
use crate::questions::parser::{parse_question_blocks, QuestionBank};
use crate::routes::extract::ApiJson;

#[derive(Debug, Deserialize)]
pub struct ParseQuestionsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseQuestionsResponse {
    pub technologies: Vec<String>,
    pub questions: usize,
    pub bank: QuestionBank,
}

/// POST /api/v1/questions/parse
///
/// Runs raw model output through the question-block parser. Text without any
/// headings yields an empty bank, not an error.
pub async fn handle_parse_questions(
    ApiJson(request): ApiJson<ParseQuestionsRequest>,
) -> Result<Json<ParseQuestionsResponse>, AppError> {
    if request.text.len() > MAX_TEXT_BYTES {
        return Err(AppError::Validation(format!(
            "text must be at most {MAX_TEXT_BYTES} bytes"
        )));
    }

    let bank = parse_question_blocks(strip_code_fences(&request.text));
    Ok(Json(ParseQuestionsResponse {
        technologies: bank.technologies().into_iter().map(str::to_string).collect(),
        questions: bank.question_count(),
        bank,
    }))
}

const MAX_TEXT_BYTES: usize = 64 * 1024;
