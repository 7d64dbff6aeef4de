//! Interview report — everything the summary step shows, computed from the
//! current answer sheet in one pass. Never updated incrementally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::evaluation::advisor::{answer_feedback, recommend, Recommendation};
use crate::evaluation::completeness::{completeness, per_technology, round2, TechnologyCompleteness};
use crate::evaluation::grading::GradingScheme;
use crate::evaluation::sentiment::{read_sentiment, SentimentReading, SentimentScorer};
use crate::evaluation::translate::Translator;
use crate::models::answers::AnswerSheet;

/// Answers are translated into this language before sentiment scoring.
pub const REVIEW_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: f64,
    /// `score` rounded to two decimals.
    pub score_display: f64,
    pub grade: String,
    pub scheme: GradingScheme,
    pub per_technology: Vec<TechnologyCompleteness>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerReview {
    pub technology: String,
    pub index: usize,
    pub question: String,
    pub answer: String,
    pub translated: String,
    pub sentiment: SentimentReading,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewReport {
    pub evaluation: EvaluationResult,
    pub recommendation: Recommendation,
    pub reviews: Vec<AnswerReview>,
    pub evaluated_at: DateTime<Utc>,
}

/// Score and grade only. Pure.
pub fn evaluate(sheet: &AnswerSheet, scheme: GradingScheme) -> EvaluationResult {
    let score = completeness(sheet);
    EvaluationResult {
        score,
        score_display: round2(score),
        grade: scheme.label_for(score).to_string(),
        scheme,
        per_technology: per_technology(sheet),
    }
}

/// Full report: evaluation, recommendation, and a review line per answer.
pub async fn build_report(
    sheet: &AnswerSheet,
    tech_stack: &str,
    scheme: GradingScheme,
    translator: &dyn Translator,
    sentiment: &dyn SentimentScorer,
) -> Result<InterviewReport, AppError> {
    let evaluation = evaluate(sheet, scheme);
    let recommendation = recommend(evaluation.score, tech_stack);

    let mut reviews = Vec::with_capacity(sheet.total_questions());
    for group in sheet.groups() {
        for (index, qa) in group.items.iter().enumerate() {
            let answer = qa.answer.trim();
            let translated = if answer.is_empty() {
                String::new()
            } else {
                translator.translate(answer, REVIEW_LANGUAGE).await?
            };
            reviews.push(AnswerReview {
                technology: group.technology.clone(),
                index,
                question: qa.question.clone(),
                answer: answer.to_string(),
                sentiment: read_sentiment(sentiment, &translated),
                translated,
                feedback: answer_feedback(answer).to_string(),
            });
        }
    }

    Ok(InterviewReport {
        evaluation,
        recommendation,
        reviews,
        evaluated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::sentiment::{LexiconSentiment, SentimentLabel};
    use crate::evaluation::translate::PassthroughTranslator;
    use crate::models::answers::{QuestionAnswer, TechnologyAnswers};
    use async_trait::async_trait;

    fn sheet(groups: &[(&str, &[&str])]) -> AnswerSheet {
        AnswerSheet::new(
            groups
                .iter()
                .map(|(tech, answers)| TechnologyAnswers {
                    technology: tech.to_string(),
                    items: answers
                        .iter()
                        .enumerate()
                        .map(|(i, a)| QuestionAnswer {
                            question: format!("{tech} Q{}", i + 1),
                            answer: a.to_string(),
                        })
                        .collect(),
                })
                .collect(),
        )
    }

    struct UppercaseTranslator;

    #[async_trait]
    impl Translator for UppercaseTranslator {
        async fn translate(&self, text: &str, _target_lang: &str) -> Result<String, AppError> {
            Ok(text.to_uppercase())
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        async fn translate(&self, _text: &str, _target_lang: &str) -> Result<String, AppError> {
            Err(AppError::Internal(anyhow::anyhow!("translator offline")))
        }
    }

    #[test]
    fn test_evaluate_go_rust_scenario() {
        let sheet = sheet(&[
            ("Go", &["Goroutines are cheap threads.", "Channels pass values.", ""]),
            ("Rust", &["Ownership means one owner.", "", "Lifetimes bound references."]),
        ]);
        let result = evaluate(&sheet, GradingScheme::Standard);
        assert!((result.score - 66.67).abs() < 0.01);
        assert_eq!(result.score_display, 66.67);
        assert_eq!(result.grade, "Good - Recommended");
        assert_eq!(result.per_technology.len(), 2);
    }

    #[test]
    fn test_equal_scores_give_equal_grades() {
        let a = sheet(&[("Go", &["x", ""])]);
        let b = sheet(&[("Rust", &["", "y"]), ("SQL", &["z", ""])]);
        let ea = evaluate(&a, GradingScheme::Standard);
        let eb = evaluate(&b, GradingScheme::Standard);
        assert_eq!(ea.score, eb.score);
        assert_eq!(ea.grade, eb.grade);
    }

    #[test]
    fn test_evaluate_empty_sheet() {
        let result = evaluate(&AnswerSheet::default(), GradingScheme::Letter);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.grade, "D (Needs Improvement)");
    }

    #[tokio::test]
    async fn test_report_reviews_every_question() {
        let sheet = sheet(&[("Go", &["I love how excellent channels are", ""])]);
        let report = build_report(
            &sheet,
            "Go",
            GradingScheme::Standard,
            &PassthroughTranslator,
            &LexiconSentiment,
        )
        .await
        .unwrap();

        assert_eq!(report.reviews.len(), 2);
        assert_eq!(report.evaluation.score, 50.0);
        assert_eq!(report.recommendation.role, "Junior Developer");

        let answered = &report.reviews[0];
        assert_eq!(answered.sentiment.label, SentimentLabel::Positive);
        assert!(answered.feedback.starts_with("Looks good"));

        let blank = &report.reviews[1];
        assert_eq!(blank.translated, "");
        assert_eq!(blank.sentiment.polarity, 0.0);
        assert_eq!(blank.feedback, "No answer provided.");
    }

    #[tokio::test]
    async fn test_report_uses_translated_text() {
        let sheet = sheet(&[("Go", &["fine"])]);
        let report = build_report(
            &sheet,
            "",
            GradingScheme::Standard,
            &UppercaseTranslator,
            &LexiconSentiment,
        )
        .await
        .unwrap();
        assert_eq!(report.reviews[0].answer, "fine");
        assert_eq!(report.reviews[0].translated, "FINE");
    }

    #[tokio::test]
    async fn test_translator_not_called_for_blank_answers() {
        let sheet = sheet(&[("Go", &["", "  "])]);
        let report = build_report(
            &sheet,
            "",
            GradingScheme::Standard,
            &FailingTranslator,
            &LexiconSentiment,
        )
        .await;
        assert!(report.is_ok());
    }

    #[tokio::test]
    async fn test_translator_failure_propagates() {
        let sheet = sheet(&[("Go", &["an answer"])]);
        let report = build_report(
            &sheet,
            "",
            GradingScheme::Standard,
            &FailingTranslator,
            &LexiconSentiment,
        )
        .await;
        assert!(report.is_err());
    }
}
