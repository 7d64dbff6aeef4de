use serde::{Deserialize, Serialize};

pub const MAX_YEARS_OF_EXPERIENCE: u32 = 50;

/// Everything the candidate enters on the first step of the wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub years_of_experience: u32,
    #[serde(default)]
    pub desired_position: String,
    #[serde(default)]
    pub location: String,
    /// Comma-separated, as typed.
    pub tech_stack: String,
    /// Plain text of an uploaded resume, already extracted upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
}

impl CandidateProfile {
    /// Trims every free-text field.
    pub fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            years_of_experience: self.years_of_experience,
            desired_position: self.desired_position.trim().to_string(),
            location: self.location.trim().to_string(),
            tech_stack: self.tech_stack.trim().to_string(),
            resume_text: self
                .resume_text
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }

    /// Collects every problem with the profile into one message.
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();

        if self.full_name.trim().is_empty() {
            problems.push("full name is required".to_string());
        }
        if self.email.trim().is_empty() {
            problems.push("email is required".to_string());
        } else if !looks_like_email(self.email.trim()) {
            problems.push(format!("'{}' is not a valid email address", self.email.trim()));
        }
        if parse_tech_stack(&self.tech_stack).is_empty() {
            problems.push("at least one technology is required in the tech stack".to_string());
        }
        if self.years_of_experience > MAX_YEARS_OF_EXPERIENCE {
            problems.push(format!(
                "years of experience must be between 0 and {MAX_YEARS_OF_EXPERIENCE}"
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(format!("Please fix the following: {}", problems.join("; ")))
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !email.contains(' ')
        }
        None => false,
    }
}

/// Splits a comma-separated stack into trimmed technology names.
/// Exact duplicates collapse; case variants are kept as distinct technologies.
pub fn parse_tech_stack(stack: &str) -> Vec<String> {
    let mut technologies: Vec<String> = Vec::new();
    for tech in stack.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !technologies.iter().any(|t| t == tech) {
            technologies.push(tech.to_string());
        }
    }
    technologies
}
