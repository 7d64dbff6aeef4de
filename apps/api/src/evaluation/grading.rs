//! Grade classification from a completeness score.
//!
//! Two schemes exist and are never mixed:
//! - `Standard` (canonical): four bands, inclusive lower bounds 80 / 60 / 40.
//! - `Letter`: five letter grades, strict lower bounds 90 / 75 / 50 / 30.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Poor,
    Average,
    Good,
    Excellent,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => Grade::Excellent,
            s if s >= 60.0 => Grade::Good,
            s if s >= 40.0 => Grade::Average,
            _ => Grade::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent - Highly Recommended",
            Grade::Good => "Good - Recommended",
            Grade::Average => "Average - Needs Improvement",
            Grade::Poor => "Poor - Not Recommended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    D,
    C,
    B,
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl LetterGrade {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s > 90.0 => LetterGrade::APlus,
            s if s > 75.0 => LetterGrade::A,
            s if s > 50.0 => LetterGrade::B,
            s if s > 30.0 => LetterGrade::C,
            _ => LetterGrade::D,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+ (Excellent)",
            LetterGrade::A => "A (Very Good)",
            LetterGrade::B => "B (Good)",
            LetterGrade::C => "C (Average)",
            LetterGrade::D => "D (Needs Improvement)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingScheme {
    #[default]
    Standard,
    Letter,
}

impl GradingScheme {
    pub fn label_for(&self, score: f64) -> &'static str {
        match self {
            GradingScheme::Standard => Grade::from_score(score).label(),
            GradingScheme::Letter => LetterGrade::from_score(score).label(),
        }
    }
}

impl FromStr for GradingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(GradingScheme::Standard),
            "letter" => Ok(GradingScheme::Letter),
            other => Err(format!(
                "unknown grading scheme '{other}' (expected 'standard' or 'letter')"
            )),
        }
    }
}

impl fmt::Display for GradingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingScheme::Standard => f.write_str("standard"),
            GradingScheme::Letter => f.write_str("letter"),
        }
    }
}
