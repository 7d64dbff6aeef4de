use std::sync::Arc;

use crate::config::Config;
use crate::wizard::controller::WizardController;
use crate::wizard::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Owns the pluggable question generator, translator and sentiment scorer.
    pub wizard: Arc<WizardController>,
}
