//! Skill detection over resume text that an upstream parser already extracted.
//!
//! A fixed keyword list matched case-insensitively, bounded so that `Java`
//! does not fire inside `JavaScript` nor `C` inside `C++`. Keywords that are
//! also everyday English words must match their exact casing.

use once_cell::sync::Lazy;
use regex::Regex;

pub const SKILL_KEYWORDS: &[&str] = &[
    "Python",
    "Java",
    "JavaScript",
    "TypeScript",
    "Go",
    "Rust",
    "C++",
    "C#",
    "SQL",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Django",
    "Flask",
    "Spring",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "Kafka",
    "Git",
    "Linux",
    "TensorFlow",
    "PyTorch",
];

/// Matched case-sensitively: "ready to go" is not a skill.
const CASE_SENSITIVE_KEYWORDS: &[&str] = &["Go", "Git", "Spring"];

static SKILL_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SKILL_KEYWORDS
        .iter()
        .map(|kw| {
            let flags = if CASE_SENSITIVE_KEYWORDS.contains(kw) {
                ""
            } else {
                "(?i)"
            };
            let pattern = format!(
                r"{flags}(?:^|[^a-zA-Z0-9+#.]){}(?:$|[^a-zA-Z0-9+#])",
                regex::escape(kw)
            );
            (*kw, Regex::new(&pattern).expect("valid skill pattern"))
        })
        .collect()
});

/// Keywords found in the text, in keyword-list order.
pub fn detect_skills(resume_text: &str) -> Vec<String> {
    SKILL_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(resume_text))
        .map(|(kw, _)| kw.to_string())
        .collect()
}

/// Appends detected skills the candidate didn't already list (ignoring case).
pub fn merge_detected(mut technologies: Vec<String>, detected: Vec<String>) -> Vec<String> {
    for skill in detected {
        if !technologies.iter().any(|t| t.eq_ignore_ascii_case(&skill)) {
            technologies.push(skill);
        }
    }
    technologies
}
