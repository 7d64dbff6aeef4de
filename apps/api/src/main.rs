mod config;
mod errors;
mod evaluation;
mod llm_client;
mod models;
mod questions;
mod routes;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::evaluation::sentiment::LexiconSentiment;
use crate::evaluation::translate::PassthroughTranslator;
use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::{LlmClient, LlmSettings};
use crate::questions::generator::{
    LlmQuestionGenerator, QuestionGenerator, TemplateQuestionGenerator,
};
use crate::routes::build_router;
use crate::state::AppState;
use crate::wizard::controller::WizardController;
use crate::wizard::store::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentScout API v{}", env!("CARGO_PKG_VERSION"));

    let generator = build_generator(&config)?;
    info!("Question backend: {}", generator.backend());

    let wizard = WizardController::new(
        generator,
        Arc::new(PassthroughTranslator),
        Arc::new(LexiconSentiment),
        config.grading_scheme,
    );
    info!("Grading scheme: {}", config.grading_scheme);

    let state = AppState {
        sessions: SessionStore::new(chrono::Duration::minutes(config.session_ttl_minutes)),
        wizard: Arc::new(wizard),
        config: config.clone(),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Hosted model when an API key is configured, canned templates otherwise.
fn build_generator(config: &Config) -> Result<Arc<dyn QuestionGenerator>> {
    let Some(api_key) = config.llm_api_key.clone() else {
        warn!("LLM_API_KEY not set, falling back to template questions");
        return Ok(Arc::new(TemplateQuestionGenerator));
    };

    let retry = RetryPolicy::new(
        config.generation_max_attempts,
        config.generation_backoff.policy(
            Duration::from_millis(config.generation_retry_delay_ms),
            Duration::from_millis(config.generation_retry_max_delay_ms),
        ),
    );
    info!(
        "Generation retry: {} attempts, {} backoff",
        retry.max_attempts, config.generation_backoff
    );
    let llm = LlmClient::new(
        LlmSettings {
            api_key,
            base_url: config.llm_base_url.clone(),
            model: config.llm_model.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs),
            max_tokens: config.llm_max_tokens,
        },
        retry,
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    Ok(Arc::new(LlmQuestionGenerator::new(
        llm,
        config.questions_min,
        config.questions_max,
    )))
}
