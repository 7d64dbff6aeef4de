use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::evaluation::grading::GradingScheme;
use crate::llm_client::retry::BackoffKind;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// No key means questions come from the built-in templates.
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub llm_max_tokens: u32,
    pub generation_max_attempts: u32,
    pub generation_retry_delay_ms: u64,
    /// Shape of the delay between generation attempts.
    pub generation_backoff: BackoffKind,
    /// Cap for exponential backoff.
    pub generation_retry_max_delay_ms: u64,
    pub questions_min: u32,
    pub questions_max: u32,
    pub grading_scheme: GradingScheme,
    pub session_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            llm_api_key: lookup("LLM_API_KEY").filter(|k| !k.trim().is_empty()),
            llm_base_url: lookup("LLM_BASE_URL")
                .unwrap_or_else(|| "https://openrouter.ai/api/v1".to_string()),
            llm_model: lookup("LLM_MODEL")
                .unwrap_or_else(|| "mistralai/mistral-7b-instruct".to_string()),
            llm_timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", 60)?,
            llm_max_tokens: parse_or(&lookup, "LLM_MAX_TOKENS", 1024)?,
            generation_max_attempts: parse_or(&lookup, "GENERATION_MAX_ATTEMPTS", 3)?,
            generation_retry_delay_ms: parse_or(&lookup, "GENERATION_RETRY_DELAY_MS", 2000)?,
            generation_backoff: parse_or(&lookup, "GENERATION_BACKOFF", BackoffKind::Fixed)?,
            generation_retry_max_delay_ms: parse_or(
                &lookup,
                "GENERATION_RETRY_MAX_DELAY_MS",
                30_000,
            )?,
            questions_min: parse_or(&lookup, "QUESTIONS_MIN", 3)?,
            questions_max: parse_or(&lookup, "QUESTIONS_MAX", 5)?,
            grading_scheme: parse_or(&lookup, "GRADING_SCHEME", GradingScheme::Standard)?,
            session_ttl_minutes: parse_or(&lookup, "SESSION_TTL_MINUTES", 120)?,
        };

        if config.generation_max_attempts == 0 {
            bail!("GENERATION_MAX_ATTEMPTS must be at least 1");
        }
        if config.questions_min == 0 || config.questions_min > config.questions_max {
            bail!(
                "QUESTIONS_MIN ({}) must be between 1 and QUESTIONS_MAX ({})",
                config.questions_min,
                config.questions_max
            );
        }
        if config.session_ttl_minutes <= 0 {
            bail!("SESSION_TTL_MINUTES must be positive");
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(config.llm_api_key.is_none());
        assert_eq!(config.generation_max_attempts, 3);
        assert_eq!(config.generation_retry_delay_ms, 2000);
        assert_eq!(config.generation_backoff, BackoffKind::Fixed);
        assert_eq!(config.questions_min, 3);
        assert_eq!(config.questions_max, 5);
        assert_eq!(config.grading_scheme, GradingScheme::Standard);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("LLM_API_KEY", "sk-test"),
            ("LLM_MODEL", "cohere/command"),
            ("GRADING_SCHEME", "letter"),
            ("GENERATION_MAX_ATTEMPTS", "2"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.llm_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm_model, "cohere/command");
        assert_eq!(config.grading_scheme, GradingScheme::Letter);
        assert_eq!(config.generation_max_attempts, 2);
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let config = config_from(&[("LLM_API_KEY", "   ")]).unwrap();
        assert!(config.llm_api_key.is_none());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"), "got: {err}");
    }

    #[test]
    fn test_unknown_grading_scheme_is_rejected() {
        assert!(config_from(&[("GRADING_SCHEME", "curve")]).is_err());
    }

    #[test]
    fn test_backoff_setting() {
        let config = config_from(&[
            ("GENERATION_BACKOFF", "exponential"),
            ("GENERATION_RETRY_MAX_DELAY_MS", "8000"),
        ])
        .unwrap();
        assert_eq!(config.generation_backoff, BackoffKind::Exponential);
        assert_eq!(config.generation_retry_max_delay_ms, 8000);
        assert!(config_from(&[("GENERATION_BACKOFF", "jitter")]).is_err());
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        assert!(config_from(&[("GENERATION_MAX_ATTEMPTS", "0")]).is_err());
    }

    #[test]
    fn test_inverted_question_range_is_rejected() {
        assert!(config_from(&[("QUESTIONS_MIN", "6"), ("QUESTIONS_MAX", "4")]).is_err());
    }
}
