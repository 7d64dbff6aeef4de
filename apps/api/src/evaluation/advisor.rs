//! Role/upskill recommendation and per-answer feedback lines.

use serde::{Deserialize, Serialize};

use crate::evaluation::grading::Grade;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub role: String,
    pub upskill: String,
}

/// Maps the overall score onto a suggested role and upskilling focus, using the
/// same four bands as the standard grade.
pub fn recommend(score: f64, tech_stack: &str) -> Recommendation {
    let (role, upskill) = match Grade::from_score(score) {
        Grade::Excellent => ("Senior Developer", "Advanced Algorithms, System Design"),
        Grade::Good => ("Mid-Level Developer", "Data Structures, Coding Practice"),
        Grade::Average => ("Junior Developer", "Core Programming Fundamentals, Debugging"),
        Grade::Poor => ("Trainee / Internship", "Basic Programming Skills"),
    };

    let stack = tech_stack.trim();
    let upskill = if stack.is_empty() {
        upskill.to_string()
    } else {
        format!("{upskill}; deepen hands-on practice with {stack}")
    };

    Recommendation {
        role: role.to_string(),
        upskill,
    }
}

/// One-line reviewer note for a single answer.
pub fn answer_feedback(answer: &str) -> &'static str {
    if answer.trim().is_empty() {
        "No answer provided."
    } else {
        "Looks good! Add examples or code if possible."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_match_grade_thresholds() {
        assert_eq!(recommend(80.0, "").role, "Senior Developer");
        assert_eq!(recommend(79.9, "").role, "Mid-Level Developer");
        assert_eq!(recommend(60.0, "").role, "Mid-Level Developer");
        assert_eq!(recommend(40.0, "").role, "Junior Developer");
        assert_eq!(recommend(12.5, "").role, "Trainee / Internship");
    }

    #[test]
    fn test_upskill_mentions_stack_when_present() {
        let rec = recommend(66.67, "Go, Rust");
        assert_eq!(
            rec.upskill,
            "Data Structures, Coding Practice; deepen hands-on practice with Go, Rust"
        );
    }

    #[test]
    fn test_upskill_without_stack_is_canned() {
        let rec = recommend(95.0, "   ");
        assert_eq!(rec.upskill, "Advanced Algorithms, System Design");
    }

    #[test]
    fn test_answer_feedback() {
        assert_eq!(answer_feedback("  "), "No answer provided.");
        assert!(answer_feedback("I used channels").starts_with("Looks good"));
    }
}
