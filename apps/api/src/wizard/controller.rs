use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::evaluation::grading::GradingScheme;
use crate::evaluation::report::build_report;
use crate::evaluation::sentiment::SentimentScorer;
use crate::evaluation::skills::{detect_skills, merge_detected};
use crate::evaluation::translate::Translator;
use crate::models::answers::AnswerInput;
use crate::models::candidate::{parse_tech_stack, CandidateProfile};
use crate::questions::generator::{QuestionGenerator, QuestionRequest};
use crate::wizard::state::{WizardError, WizardStep};
use crate::wizard::store::WizardSession;

/// Drives sessions through the wizard. Every method takes a session by value
/// and returns the advanced copy; the caller decides whether to persist it.
pub struct WizardController {
    generator: Arc<dyn QuestionGenerator>,
    translator: Arc<dyn Translator>,
    sentiment: Arc<dyn SentimentScorer>,
    scheme: GradingScheme,
}

impl WizardController {
    pub fn new(
        generator: Arc<dyn QuestionGenerator>,
        translator: Arc<dyn Translator>,
        sentiment: Arc<dyn SentimentScorer>,
        scheme: GradingScheme,
    ) -> Self {
        Self {
            generator,
            translator,
            sentiment,
            scheme,
        }
    }

    pub fn scheme(&self) -> GradingScheme {
        self.scheme
    }

    pub fn backend(&self) -> &'static str {
        self.generator.backend()
    }

    /// Info → Interview. Validates the profile, widens the stack with skills
    /// found in the resume and asks the generator for questions.
    pub async fn submit_info(
        &self,
        session: WizardSession,
        profile: CandidateProfile,
    ) -> Result<WizardSession, AppError> {
        session
            .state
            .expect_step(WizardStep::Info, "submit candidate info")?;

        let candidate = profile.normalized();
        candidate
            .validate()
            .map_err(WizardError::InvalidCandidate)?;

        let mut technologies = parse_tech_stack(&candidate.tech_stack);
        if let Some(resume) = candidate.resume_text.as_deref() {
            let detected = detect_skills(resume);
            if !detected.is_empty() {
                info!(
                    "Session {}: detected {} skills in resume",
                    session.id,
                    detected.len()
                );
            }
            technologies = merge_detected(technologies, detected);
        }

        let generated = self
            .generator
            .generate(&QuestionRequest {
                technologies: &technologies,
                position: &candidate.desired_position,
                years_of_experience: candidate.years_of_experience,
            })
            .await?;

        if generated.bank.is_empty() {
            warn!(
                "Session {}: {} generator returned no parsable questions",
                session.id,
                self.generator.backend()
            );
        }

        let id = session.id;
        let next = session
            .state
            .clone()
            .start_interview(candidate, technologies, &generated.bank)?;

        info!(
            "Session {id}: interview started with {} questions ({} backend)",
            generated.bank.question_count(),
            self.generator.backend()
        );

        let mut session = session.advance(next);
        session.raw_questions = Some(generated.raw_text);
        Ok(session)
    }

    /// Interview → Interview with the given answers applied.
    pub fn save_answers(
        &self,
        session: WizardSession,
        answers: &[AnswerInput],
    ) -> Result<WizardSession, AppError> {
        let next = session.state.clone().with_answers(answers)?;
        Ok(session.advance(next))
    }

    /// Interview → Summary. Applies any final answers, then builds the report.
    pub async fn submit_answers(
        &self,
        session: WizardSession,
        answers: &[AnswerInput],
    ) -> Result<WizardSession, AppError> {
        let answered = session.state.clone().with_answers(answers)?;
        let (sheet, candidate) = match (answered.sheet(), answered.candidate()) {
            (Some(sheet), Some(candidate)) => (sheet, candidate),
            _ => {
                return Err(WizardError::InvalidTransition {
                    action: "submit answers",
                    step: answered.step(),
                }
                .into())
            }
        };

        let report = build_report(
            sheet,
            &candidate.tech_stack,
            self.scheme,
            self.translator.as_ref(),
            self.sentiment.as_ref(),
        )
        .await?;

        info!(
            "Session {}: submitted, score {:.2} ({})",
            session.id, report.evaluation.score, report.evaluation.grade
        );

        let next = answered.complete(report)?;
        Ok(session.advance(next))
    }

    /// Interview → Info, keeping the profile as a draft.
    pub fn back(&self, session: WizardSession) -> Result<WizardSession, AppError> {
        let next = session.state.clone().back()?;
        let mut session = session.advance(next);
        session.raw_questions = None;
        Ok(session)
    }

    /// Any step → empty Info.
    pub fn restart(&self, session: WizardSession) -> WizardSession {
        let next = session.state.clone().restart();
        let mut session = session.advance(next);
        session.raw_questions = None;
        session
    }
}
