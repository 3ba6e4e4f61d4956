//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The requested spread id is absent from the schema source.
    #[error("spread not found: {0}")]
    SpreadNotFound(String),

    /// The deck could not be loaded or cannot satisfy the spread.
    #[error("deck load failure: {0}")]
    DeckLoadFailure(String),

    /// A schema or input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The interpretation service call failed.
    #[error("interpretation failed: {0}")]
    Interpretation(String),

    /// The interpretation service answered with data we cannot read.
    #[error("malformed interpretation response: {0}")]
    MalformedResponse(String),

    /// An I/O or decoding failure in an adapter.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
