//! Gateway errors.

use arcana_session::domain::errors::SessionError;
use thiserror::Error;

use super::persona::RejectionReason;

/// Why an interpretation could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretationError {
    /// The session cannot start a request right now.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The persona may not serve this method or locale.
    #[error("persona rejected: {0}")]
    PersonaRejected(RejectionReason),

    /// The service call failed or returned unreadable data. The session
    /// keeps its draw and the request can be retried.
    #[error("interpretation request failed: {0}")]
    Service(String),

    /// Retry was asked for without a failed request.
    #[error("no failed interpretation to retry")]
    NothingToRetry,
}
