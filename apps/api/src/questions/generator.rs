//! Question generation — pluggable, trait-based source of interview questions.
//!
//! Default: `LlmQuestionGenerator` (hosted model, output parsed as question blocks).
//! Fallback: `TemplateQuestionGenerator` (three canned questions per technology,
//! used when no API key is configured).

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::strip_code_fences;
use crate::llm_client::LlmClient;
use crate::questions::parser::{parse_question_blocks, QuestionBank};
use crate::questions::prompts::{QUESTION_PROMPT_TEMPLATE, QUESTION_SYSTEM};

/// What the generator is asked for.
#[derive(Debug, Clone)]
pub struct QuestionRequest<'a> {
    pub technologies: &'a [String],
    pub position: &'a str,
    pub years_of_experience: u32,
}

/// Generator output: the raw text (kept for display/debugging) and the parsed bank.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneratedQuestions {
    pub raw_text: String,
    pub bank: QuestionBank,
}

/// Implement this to swap question sources without touching the wizard.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, request: &QuestionRequest<'_>)
        -> Result<GeneratedQuestions, AppError>;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmQuestionGenerator
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmQuestionGenerator {
    llm: LlmClient,
    min_per_technology: u32,
    max_per_technology: u32,
}

impl LlmQuestionGenerator {
    pub fn new(llm: LlmClient, min_per_technology: u32, max_per_technology: u32) -> Self {
        Self {
            llm,
            min_per_technology,
            max_per_technology,
        }
    }

    fn build_prompt(&self, request: &QuestionRequest<'_>) -> String {
        let position = if request.position.trim().is_empty() {
            "a software engineering role"
        } else {
            request.position.trim()
        };
        QUESTION_PROMPT_TEMPLATE
            .replace("{tech_stack}", &request.technologies.join(", "))
            .replace("{position}", position)
            .replace("{experience}", &request.years_of_experience.to_string())
            .replace("{min}", &self.min_per_technology.to_string())
            .replace("{max}", &self.max_per_technology.to_string())
    }
}

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn generate(
        &self,
        request: &QuestionRequest<'_>,
    ) -> Result<GeneratedQuestions, AppError> {
        let prompt = self.build_prompt(request);
        let raw_text = self.llm.complete(&prompt, QUESTION_SYSTEM).await?;
        let bank = parse_question_blocks(strip_code_fences(&raw_text));

        info!(
            "Generated {} questions across {} technologies (model: {})",
            bank.question_count(),
            bank.len(),
            self.llm.model()
        );

        Ok(GeneratedQuestions { raw_text, bank })
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateQuestionGenerator
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic questions, no network. Renders the same block format the model is
/// asked for and runs it through the same parser.
pub struct TemplateQuestionGenerator;

const TEMPLATES: &[&str] = &[
    "What is {tech} and why is it important?",
    "Explain a key challenge you faced with {tech}.",
    "How do you optimize performance in {tech}?",
];

#[async_trait]
impl QuestionGenerator for TemplateQuestionGenerator {
    async fn generate(
        &self,
        request: &QuestionRequest<'_>,
    ) -> Result<GeneratedQuestions, AppError> {
        let mut raw_text = String::new();
        for tech in request.technologies {
            raw_text.push_str(&format!("### {tech}\n"));
            for template in TEMPLATES {
                raw_text.push_str(&format!("* {}\n", template.replace("{tech}", tech)));
            }
        }
        let bank = parse_question_blocks(&raw_text);
        Ok(GeneratedQuestions { raw_text, bank })
    }

    fn backend(&self) -> &'static str {
        "template"
    }
}
