//! Question-block parser — turns generator output into technology → questions.
//!
//! Expected shape (not guaranteed, the text comes from a hosted model):
//!
//! ```text
//! ### Go
//! * What is a goroutine?
//! * Explain channels.
//! ### Rust
//! - What is ownership?
//! ```
//!
//! Parsing never fails. Anything that doesn't fit degrades to fewer sections.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const HEADING_MARKER: &str = "###";

static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[*-]\s*").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyQuestions {
    pub technology: String,
    pub questions: Vec<String>,
}

/// Ordered technology → questions mapping. Order is first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    sections: Vec<TechnologyQuestions>,
}

impl QuestionBank {
    /// Inserts or replaces a technology's questions.
    /// A replaced technology keeps its original position.
    pub fn insert(&mut self, technology: impl Into<String>, questions: Vec<String>) {
        let technology = technology.into();
        match self.sections.iter_mut().find(|s| s.technology == technology) {
            Some(existing) => existing.questions = questions,
            None => self.sections.push(TechnologyQuestions {
                technology,
                questions,
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sections
            .iter()
            .map(|s| (s.technology.as_str(), s.questions.as_slice()))
    }

    pub fn technologies(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.technology.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

/// Parses `### Technology` headed sections of bulleted questions.
pub fn parse_question_blocks(text: &str) -> QuestionBank {
    let mut bank = QuestionBank::default();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in text.lines() {
        if let Some(heading) = heading_text(line) {
            if let Some((tech, questions)) = current.take() {
                commit_section(&mut bank, tech, questions);
            }
            current = Some((heading.to_string(), Vec::new()));
            continue;
        }

        // Preamble before the first heading is ignored.
        let Some((_, questions)) = current.as_mut() else {
            continue;
        };

        let question = BULLET.replace(line, "");
        let question = question.trim();
        if !question.is_empty() {
            questions.push(question.to_string());
        }
    }

    if let Some((tech, questions)) = current {
        commit_section(&mut bank, tech, questions);
    }

    bank
}

fn heading_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with(HEADING_MARKER) {
        Some(trimmed.trim_start_matches('#').trim())
    } else {
        None
    }
}

fn commit_section(bank: &mut QuestionBank, technology: String, questions: Vec<String>) {
    if technology.is_empty() || questions.is_empty() {
        return;
    }
    bank.insert(technology, questions);
}
