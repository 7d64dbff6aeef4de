use async_trait::async_trait;

use crate::errors::AppError;

/// Translates candidate answers into the reviewer's language before scoring.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, AppError>;
}

/// Returns the text unchanged. Used when no translation backend is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str, _target_lang: &str) -> Result<String, AppError> {
        Ok(text.trim().to_string())
    }
}
