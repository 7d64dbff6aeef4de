// LLM prompt constants for interview question generation.

/// System prompt for question generation.
pub const QUESTION_SYSTEM: &str = "You are a senior technical interviewer screening \
    candidates for a software engineering role. You write clear, specific, \
    practical interview questions that reveal real hands-on experience.";

/// Question generation prompt template.
/// Replace: {tech_stack}, {min}, {max}, {position}, {experience}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"A candidate has the tech stack: {tech_stack}.
They are applying for: {position}, with {experience} years of experience.

Generate {min} to {max} interview questions per technology, pitched at their level.

Format EXACTLY as:
### Technology
* Question 1
* Question 2

Rules:
1. One `### ` heading per technology, using the technology name exactly as given
2. One question per `* ` bullet line, no numbering, no sub-bullets
3. No text before the first heading or after the last question"#;
