//! Errors raised by session transitions.

use arcana_core::locale::Locale;
use thiserror::Error;

/// Why the session refused to start an interpretation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Interpretation needs a confirmed draw.
    #[error("session is not in the reading phase")]
    NotReading,

    /// Another request is still pending.
    #[error("an interpretation request is already in flight")]
    InterpretationInFlight,

    /// Card names are still in the locale the deck was loaded for.
    #[error("deck is in {deck} but the session is in {active}")]
    DeckLocaleMismatch { deck: Locale, active: Locale },
}
