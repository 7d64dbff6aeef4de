use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::wizard::state::WizardState;

/// One candidate's pass through the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSession {
    pub id: Uuid,
    /// Bumped by the store on every write.
    #[serde(default)]
    pub version: u64,
    pub state: WizardState,
    /// Unparsed generator output from the last successful info submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_questions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WizardSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            version: 0,
            state: WizardState::default(),
            raw_questions: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the state and bumps `updated_at`.
    pub fn advance(mut self, state: WizardState) -> Self {
        self.state = state;
        self.updated_at = Utc::now();
        self
    }

    fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.updated_at > ttl
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory session store. Handlers take a snapshot, run a transition on it
/// and write it back with the version they read; the lock is never held across
/// an await on anything else.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, WizardSession>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Creates a fresh session, pruning idle ones first.
    pub async fn create(&self) -> WizardSession {
        let session = WizardSession::new();
        let mut sessions = self.inner.write().await;

        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(self.ttl, now));
        let pruned = before - sessions.len();
        if pruned > 0 {
            info!("Pruned {pruned} expired sessions");
        }

        sessions.insert(session.id, session.clone());
        debug!("Created session {}", session.id);
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<WizardSession, AppError> {
        let sessions = self.inner.read().await;
        sessions
            .get(&id)
            .filter(|s| !s.is_expired(self.ttl, Utc::now()))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Writes back a session obtained from `get`, provided nobody else wrote it
    /// since. `expected_version` is the version that was read.
    pub async fn save(
        &self,
        expected_version: u64,
        mut session: WizardSession,
    ) -> Result<WizardSession, AppError> {
        let mut sessions = self.inner.write().await;
        let Some(slot) = sessions.get_mut(&session.id) else {
            return Err(AppError::NotFound(format!("Session {} not found", session.id)));
        };
        if slot.version != expected_version {
            warn!(
                "Session {}: stale write (read version {expected_version}, stored {})",
                session.id, slot.version
            );
            return Err(AppError::Conflict(format!(
                "Session {} was changed by another request, reload it and try again",
                session.id
            )));
        }
        session.version = expected_version + 1;
        *slot = session.clone();
        Ok(session)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }
}
