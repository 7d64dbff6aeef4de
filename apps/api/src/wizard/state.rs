//! The three-step wizard as an explicit state machine.
//!
//! Every transition consumes the current state and returns the next one, or a
//! `WizardError` describing why the action isn't allowed. Callers work on a
//! copy, so a failed transition leaves the stored session untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::evaluation::report::InterviewReport;
use crate::models::answers::{AnswerInput, AnswerSheet};
use crate::models::candidate::CandidateProfile;
use crate::questions::parser::QuestionBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Info,
    Interview,
    Summary,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::Info => f.write_str("info"),
            WizardStep::Interview => f.write_str("interview"),
            WizardStep::Summary => f.write_str("summary"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("cannot {action} while on the {step} step")]
    InvalidTransition {
        action: &'static str,
        step: WizardStep,
    },

    #[error("{0}")]
    InvalidCandidate(String),

    #[error("there is no question {index} for technology '{technology}'")]
    UnknownQuestion { technology: String, index: usize },

    #[error("no interview questions could be generated for this tech stack, please review it and try again")]
    NoQuestions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WizardState {
    Info {
        /// Profile from an earlier pass, offered back for editing.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        draft: Option<CandidateProfile>,
    },
    Interview {
        candidate: CandidateProfile,
        technologies: Vec<String>,
        sheet: AnswerSheet,
    },
    Summary {
        candidate: CandidateProfile,
        technologies: Vec<String>,
        sheet: AnswerSheet,
        report: InterviewReport,
    },
}

impl Default for WizardState {
    fn default() -> Self {
        WizardState::Info { draft: None }
    }
}

impl WizardState {
    pub fn step(&self) -> WizardStep {
        match self {
            WizardState::Info { .. } => WizardStep::Info,
            WizardState::Interview { .. } => WizardStep::Interview,
            WizardState::Summary { .. } => WizardStep::Summary,
        }
    }

    pub fn sheet(&self) -> Option<&AnswerSheet> {
        match self {
            WizardState::Info { .. } => None,
            WizardState::Interview { sheet, .. } | WizardState::Summary { sheet, .. } => Some(sheet),
        }
    }

    pub fn candidate(&self) -> Option<&CandidateProfile> {
        match self {
            WizardState::Info { draft } => draft.as_ref(),
            WizardState::Interview { candidate, .. } | WizardState::Summary { candidate, .. } => {
                Some(candidate)
            }
        }
    }

    fn invalid(&self, action: &'static str) -> WizardError {
        WizardError::InvalidTransition {
            action,
            step: self.step(),
        }
    }

    /// Fails unless the wizard is on `step`. Lets callers reject an action before
    /// doing expensive work for it.
    pub fn expect_step(&self, step: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step() == step {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    /// Info → Interview with a blank answer sheet built from `bank`.
    pub fn start_interview(
        self,
        candidate: CandidateProfile,
        technologies: Vec<String>,
        bank: &QuestionBank,
    ) -> Result<Self, WizardError> {
        self.expect_step(WizardStep::Info, "submit candidate info")?;
        let sheet = AnswerSheet::from_bank(bank);
        if sheet.is_empty() {
            return Err(WizardError::NoQuestions);
        }
        Ok(WizardState::Interview {
            candidate,
            technologies,
            sheet,
        })
    }

    /// Interview → Interview with answers applied. All-or-nothing.
    pub fn with_answers(self, answers: &[AnswerInput]) -> Result<Self, WizardError> {
        match self {
            WizardState::Interview {
                candidate,
                technologies,
                mut sheet,
            } => {
                for input in answers {
                    if !sheet.set_answer(&input.technology, input.index, input.answer.as_str()) {
                        return Err(WizardError::UnknownQuestion {
                            technology: input.technology.clone(),
                            index: input.index,
                        });
                    }
                }
                Ok(WizardState::Interview {
                    candidate,
                    technologies,
                    sheet,
                })
            }
            other => Err(other.invalid("save answers")),
        }
    }

    /// Interview → Summary.
    pub fn complete(self, report: InterviewReport) -> Result<Self, WizardError> {
        match self {
            WizardState::Interview {
                candidate,
                technologies,
                sheet,
            } => Ok(WizardState::Summary {
                candidate,
                technologies,
                sheet,
                report,
            }),
            other => Err(other.invalid("submit answers")),
        }
    }

    /// Interview → Info, keeping the profile as a draft. Answers are discarded.
    pub fn back(self) -> Result<Self, WizardError> {
        match self {
            WizardState::Interview { candidate, .. } => Ok(WizardState::Info {
                draft: Some(candidate),
            }),
            other => Err(other.invalid("go back")),
        }
    }

    /// Any state → empty Info.
    pub fn restart(self) -> Self {
        WizardState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::report::evaluate;
    use crate::evaluation::advisor::recommend;
    use crate::evaluation::grading::GradingScheme;
    use crate::questions::parser::parse_question_blocks;
    use chrono::Utc;

    fn candidate() -> CandidateProfile {
        CandidateProfile {
            full_name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            tech_stack: "Go, Rust".into(),
            ..Default::default()
        }
    }

    fn bank() -> QuestionBank {
        parse_question_blocks("### Go\n* q1\n* q2\n* q3\n### Rust\n* q1\n* q2\n* q3")
    }

    fn interview() -> WizardState {
        WizardState::default()
            .start_interview(candidate(), vec!["Go".into(), "Rust".into()], &bank())
            .unwrap()
    }

    fn report_for(state: &WizardState) -> InterviewReport {
        let evaluation = evaluate(state.sheet().unwrap(), GradingScheme::Standard);
        InterviewReport {
            recommendation: recommend(evaluation.score, "Go, Rust"),
            evaluation,
            reviews: vec![],
            evaluated_at: Utc::now(),
        }
    }

    fn answer(tech: &str, index: usize, text: &str) -> AnswerInput {
        AnswerInput {
            technology: tech.into(),
            index,
            answer: text.into(),
        }
    }

    #[test]
    fn test_initial_state_is_empty_info() {
        let state = WizardState::default();
        assert_eq!(state.step(), WizardStep::Info);
        assert!(state.candidate().is_none());
        assert!(state.sheet().is_none());
    }

    #[test]
    fn test_start_interview_builds_blank_sheet() {
        let state = interview();
        assert_eq!(state.step(), WizardStep::Interview);
        assert_eq!(state.sheet().unwrap().total_questions(), 6);
        assert_eq!(state.sheet().unwrap().answered_questions(), 0);
    }

    #[test]
    fn test_start_interview_with_empty_bank_fails() {
        let err = WizardState::default()
            .start_interview(candidate(), vec![], &QuestionBank::default())
            .unwrap_err();
        assert_eq!(err, WizardError::NoQuestions);
    }

    #[test]
    fn test_full_happy_path_go_rust() {
        let state = interview()
            .with_answers(&[
                answer("Go", 0, "lightweight threads"),
                answer("Go", 1, "typed pipes"),
                answer("Rust", 0, "single owner"),
                answer("Rust", 2, "borrow rules"),
            ])
            .unwrap();
        let report = report_for(&state);
        assert!((report.evaluation.score - 66.67).abs() < 0.01);

        let done = state.complete(report).unwrap();
        assert_eq!(done.step(), WizardStep::Summary);
        assert_eq!(done.candidate().unwrap().full_name, "Grace Hopper");
    }

    #[test]
    fn test_unknown_answer_target_rejected_atomically() {
        let err = interview()
            .with_answers(&[answer("Go", 0, "ok"), answer("Python", 0, "nope")])
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::UnknownQuestion {
                technology: "Python".into(),
                index: 0
            }
        );
    }

    #[test]
    fn test_submit_info_from_summary_is_rejected() {
        let state = interview();
        let report = report_for(&state);
        let summary = state.complete(report).unwrap();
        let err = summary
            .start_interview(candidate(), vec![], &bank())
            .unwrap_err();
        assert!(matches!(
            err,
            WizardError::InvalidTransition {
                step: WizardStep::Summary,
                ..
            }
        ));
    }

    #[test]
    fn test_answers_rejected_outside_interview() {
        let err = WizardState::default()
            .with_answers(&[answer("Go", 0, "x")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot save answers while on the info step"
        );
    }

    #[test]
    fn test_complete_requires_interview() {
        let state = interview();
        let report = report_for(&state);
        assert!(WizardState::default().complete(report).is_err());
    }

    #[test]
    fn test_back_keeps_candidate_as_draft() {
        let state = interview().back().unwrap();
        assert_eq!(state, WizardState::Info { draft: Some(candidate()) });
        assert!(WizardState::default().back().is_err());
    }

    #[test]
    fn test_restart_from_every_state() {
        let info = WizardState::Info { draft: Some(candidate()) };
        let interview_state = interview();
        let report = report_for(&interview_state);
        let summary = interview().complete(report).unwrap();
        for state in [info, interview_state, summary] {
            assert_eq!(state.restart(), WizardState::Info { draft: None });
        }
    }

    #[test]
    fn test_state_serializes_with_step_tag() {
        let json = serde_json::to_value(interview()).unwrap();
        assert_eq!(json["step"], "interview");
        assert_eq!(json["sheet"][0]["technology"], "Go");

        let back: WizardState = serde_json::from_value(json).unwrap();
        assert_eq!(back.step(), WizardStep::Interview);
    }
}
