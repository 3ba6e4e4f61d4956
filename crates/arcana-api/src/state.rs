//! Shared application state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use arcana_core::clock::Clock;
use arcana_core::repository::{DeckProvider, SpreadRepository};
use arcana_core::rng::DeterministicRng;
use arcana_interpretation::application::gateway::InterpretationGateway;
use arcana_session::domain::aggregates::ReadingSession;
use arcana_session::domain::draw::DrawPolicy;
use uuid::Uuid;

use crate::error::ApiError;

/// Live sessions by id.
pub type SessionMap = HashMap<Uuid, ReadingSession>;

/// Application state shared across all request handlers.
///
/// Locks are taken sessions first, then the RNG, and are never held across
/// an `.await`.
#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    pub spreads: Arc<dyn SpreadRepository>,
    pub decks: Arc<dyn DeckProvider>,
    pub gateway: InterpretationGateway,
    pub policy: DrawPolicy,
    pub sessions: Arc<Mutex<SessionMap>>,
}

impl AppState {
    /// Create new application state with no sessions.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        spreads: Arc<dyn SpreadRepository>,
        decks: Arc<dyn DeckProvider>,
        gateway: InterpretationGateway,
        policy: DrawPolicy,
    ) -> Self {
        Self {
            clock,
            rng,
            spreads,
            decks,
            gateway,
            policy,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Stores a session, replacing any with the same id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the session lock is poisoned.
    pub fn insert_session(&self, session: ReadingSession) -> Result<(), ApiError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| ApiError::Internal(format!("session mutex poisoned: {e}")))?;
        sessions.insert(session.id(), session);
        Ok(())
    }

    /// Drops session `id`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::SessionNotFound` for an unknown id and
    /// `ApiError::Internal` if the session lock is poisoned.
    pub fn remove_session(&self, id: Uuid) -> Result<ReadingSession, ApiError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| ApiError::Internal(format!("session mutex poisoned: {e}")))?;
        sessions.remove(&id).ok_or(ApiError::SessionNotFound(id))
    }

    /// Runs `f` on session `id` with the shared RNG.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::SessionNotFound` for an unknown id and
    /// `ApiError::Internal` if a lock is poisoned.
    pub fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut ReadingSession, &mut dyn DeterministicRng) -> R,
    ) -> Result<R, ApiError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| ApiError::Internal(format!("session mutex poisoned: {e}")))?;
        let session = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))?;
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| ApiError::Internal(format!("RNG mutex poisoned: {e}")))?;
        Ok(f(session, &mut *rng))
    }
}
