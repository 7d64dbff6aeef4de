use serde::{Deserialize, Serialize};

use crate::models::answers::{AnswerSheet, TechnologyAnswers};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyCompleteness {
    pub technology: String,
    pub answered: usize,
    pub total: usize,
    pub score: f64,
}

/// Percentage (0–100) of questions with a non-blank answer across the whole sheet.
/// An empty sheet scores 0.
pub fn completeness(sheet: &AnswerSheet) -> f64 {
    percentage(sheet.answered_questions(), sheet.total_questions())
}

/// Same computation restricted to one technology's questions.
pub fn technology_completeness(group: &TechnologyAnswers) -> TechnologyCompleteness {
    let total = group.items.len();
    let answered = group.items.iter().filter(|qa| qa.is_answered()).count();
    TechnologyCompleteness {
        technology: group.technology.clone(),
        answered,
        total,
        score: percentage(answered, total),
    }
}

pub fn per_technology(sheet: &AnswerSheet) -> Vec<TechnologyCompleteness> {
    sheet.groups().iter().map(technology_completeness).collect()
}

fn percentage(answered: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (answered as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// Rounds to two decimals for display.
pub fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
