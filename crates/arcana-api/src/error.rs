//! Arcana — API error types.

use arcana_core::error::DomainError;
use arcana_interpretation::domain::errors::InterpretationError;
use arcana_session::domain::errors::SessionError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Catalog, deck directory, or interpretation client could not be set up.
    #[error("startup error: {0}")]
    Startup(#[from] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// Errors a request handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Interpretation(#[from] InterpretationError),

    #[error("session {0} not found")]
    SessionNotFound(Uuid),

    /// Shared state is unusable, e.g. a poisoned lock.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Domain(err) => match err {
                DomainError::SpreadNotFound(_) => (StatusCode::NOT_FOUND, "spread_not_found"),
                DomainError::DeckLoadFailure(_) => (StatusCode::BAD_GATEWAY, "deck_load_failure"),
                DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                DomainError::Interpretation(_) => {
                    (StatusCode::BAD_GATEWAY, "interpretation_failed")
                }
                DomainError::MalformedResponse(_) => {
                    (StatusCode::BAD_GATEWAY, "malformed_response")
                }
                DomainError::Infrastructure(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
                }
            },
            Self::Interpretation(err) => match err {
                InterpretationError::Session(SessionError::NotReading) => {
                    (StatusCode::CONFLICT, "not_reading")
                }
                InterpretationError::Session(SessionError::InterpretationInFlight) => {
                    (StatusCode::CONFLICT, "interpretation_in_flight")
                }
                InterpretationError::Session(SessionError::DeckLocaleMismatch { .. }) => {
                    (StatusCode::CONFLICT, "deck_locale_mismatch")
                }
                InterpretationError::PersonaRejected(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "persona_rejected")
                }
                InterpretationError::Service(_) => {
                    (StatusCode::BAD_GATEWAY, "interpretation_failed")
                }
                InterpretationError::NothingToRetry => (StatusCode::CONFLICT, "nothing_to_retry"),
            },
            Self::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
