use serde::{Deserialize, Serialize};

use crate::questions::parser::QuestionBank;

/// One generated question and the candidate's answer to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl QuestionAnswer {
    pub fn is_answered(&self) -> bool {
        !self.answer.trim().is_empty()
    }
}

/// All questions for one technology, in the order they were generated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnologyAnswers {
    pub technology: String,
    pub items: Vec<QuestionAnswer>,
}

/// A single answer edit sent by the candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerInput {
    pub technology: String,
    /// 0-based position of the question within its technology.
    pub index: usize,
    pub answer: String,
}

/// Ordered technology → question/answer pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    groups: Vec<TechnologyAnswers>,
}

impl AnswerSheet {
    pub fn new(groups: Vec<TechnologyAnswers>) -> Self {
        Self { groups }
    }

    /// Blank answer sheet with one pair per generated question.
    pub fn from_bank(bank: &QuestionBank) -> Self {
        let groups = bank
            .iter()
            .map(|(technology, questions)| TechnologyAnswers {
                technology: technology.to_string(),
                items: questions
                    .iter()
                    .map(|q| QuestionAnswer {
                        question: q.clone(),
                        answer: String::new(),
                    })
                    .collect(),
            })
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[TechnologyAnswers] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.total_questions() == 0
    }

    pub fn total_questions(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn answered_questions(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter())
            .filter(|qa| qa.is_answered())
            .count()
    }

    /// Sets one answer. Returns `false` when the technology or index doesn't exist.
    pub fn set_answer(&mut self, technology: &str, index: usize, answer: impl Into<String>) -> bool {
        match self
            .groups
            .iter_mut()
            .find(|g| g.technology == technology)
            .and_then(|g| g.items.get_mut(index))
        {
            Some(qa) => {
                qa.answer = answer.into();
                true
            }
            None => false,
        }
    }
}
