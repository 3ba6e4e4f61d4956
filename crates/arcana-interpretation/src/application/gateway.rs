//! Interpretation gateway.
//!
//! A request runs in three steps so a host can release its session lock
//! while the service is working:
//!
//! 1. [`InterpretationGateway::begin`] gates the persona, packages the draw,
//!    and marks the session pending.
//! 2. [`InterpretationGateway::dispatch`] calls the service. No session
//!    access.
//! 3. [`InterpretationGateway::complete`] hands the answer back; the session
//!    discards it if the locale moved in the meantime.

use std::sync::Arc;

use arcana_core::interpretation::{
    InterpretationRequest, InterpretationResult, InterpretationService,
};
use arcana_core::rng::DeterministicRng;
use arcana_session::domain::aggregates::{
    InterpretationCompletion, InterpretationStatus, ReadingSession,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::InterpretationError;
use crate::domain::payload::build_request;
use crate::domain::persona::{PersonaRegistry, ReadingMethod};

/// Method personas must offer to interpret a spread draw.
const READING_METHOD: ReadingMethod = ReadingMethod::Tarot;

/// A request the session is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInterpretation {
    /// Matches the answer to the session's pending marker.
    pub request_id: Uuid,
    /// The payload to send.
    pub request: InterpretationRequest,
}

/// Mediates between reading sessions and the interpretation service.
#[derive(Clone)]
pub struct InterpretationGateway {
    service: Arc<dyn InterpretationService>,
    personas: Arc<dyn PersonaRegistry>,
}

impl InterpretationGateway {
    /// Creates a gateway. Personas are checked for tarot readings.
    #[must_use]
    pub fn new(
        service: Arc<dyn InterpretationService>,
        personas: Arc<dyn PersonaRegistry>,
    ) -> Self {
        Self { service, personas }
    }

    /// Starts a request for `persona_id`.
    ///
    /// # Errors
    ///
    /// Returns `InterpretationError::PersonaRejected` before touching the
    /// session if the persona is not eligible, and
    /// `InterpretationError::Session` if the session is not reading or
    /// already waiting on a request.
    pub fn begin(
        &self,
        session: &mut ReadingSession,
        persona_id: &str,
    ) -> Result<PendingInterpretation, InterpretationError> {
        if let Some(reason) =
            self.personas
                .is_persona_eligible(persona_id, READING_METHOD, session.locale())
        {
            warn!(session_id = %session.id(), persona_id, %reason, "persona rejected");
            return Err(InterpretationError::PersonaRejected(reason));
        }

        let request = build_request(session, persona_id)?;
        let request_id = Uuid::new_v4();
        session.begin_interpretation(request_id, persona_id)?;

        info!(
            session_id = %session.id(),
            %request_id,
            persona_id,
            locale = %request.locale,
            cards = request.cards.len(),
            "interpretation requested"
        );
        Ok(PendingInterpretation {
            request_id,
            request,
        })
    }

    /// Calls the service for a pending request.
    #[instrument(skip(self, pending), fields(request_id = %pending.request_id))]
    pub async fn dispatch(
        &self,
        pending: &PendingInterpretation,
    ) -> Result<InterpretationResult, String> {
        self.service
            .interpret(&pending.request)
            .await
            .map_err(|e| e.to_string())
    }

    /// Hands the service's answer back to the session.
    pub fn complete(
        &self,
        session: &mut ReadingSession,
        request_id: Uuid,
        outcome: Result<InterpretationResult, String>,
        rng: &mut dyn DeterministicRng,
    ) -> InterpretationCompletion {
        session.complete_interpretation(request_id, outcome, rng)
    }

    /// Runs all three steps against a session the caller holds exclusively.
    ///
    /// Answers dropped because the locale changed or the request was
    /// superseded are not errors; the returned completion says which.
    ///
    /// # Errors
    ///
    /// Returns the `begin` errors, or `InterpretationError::Service` when the
    /// service failed. The session is then in the failed state and can be
    /// retried.
    pub async fn request_interpretation(
        &self,
        session: &mut ReadingSession,
        persona_id: &str,
        rng: &mut (dyn DeterministicRng + Send),
    ) -> Result<InterpretationCompletion, InterpretationError> {
        let pending = self.begin(session, persona_id)?;
        let outcome = self.dispatch(&pending).await;
        let failure = outcome.as_ref().err().cloned();

        match self.complete(session, pending.request_id, outcome, rng) {
            InterpretationCompletion::Failed => Err(InterpretationError::Service(
                failure.unwrap_or_default(),
            )),
            completion => Ok(completion),
        }
    }

    /// The persona to use when retrying the session's failed request.
    ///
    /// # Errors
    ///
    /// Returns `InterpretationError::NothingToRetry` unless the last request
    /// failed.
    pub fn retry_persona(session: &ReadingSession) -> Result<String, InterpretationError> {
        match (session.interpretation_status(), session.last_persona()) {
            (InterpretationStatus::Failed { .. }, Some(persona)) => Ok(persona.to_owned()),
            _ => Err(InterpretationError::NothingToRetry),
        }
    }

    /// Re-issues the last failed request with the same persona.
    ///
    /// # Errors
    ///
    /// Returns `InterpretationError::NothingToRetry` unless the last request
    /// failed, otherwise as [`Self::request_interpretation`].
    pub async fn retry(
        &self,
        session: &mut ReadingSession,
        rng: &mut (dyn DeterministicRng + Send),
    ) -> Result<InterpretationCompletion, InterpretationError> {
        let persona = Self::retry_persona(session)?;
        self.request_interpretation(session, &persona, rng).await
    }
}
