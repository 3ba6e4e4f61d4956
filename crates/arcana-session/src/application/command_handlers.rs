//! Session loading.
//!
//! Fetching the schema and the deck are the only suspension points before a
//! session can be picked from; everything after is synchronous on the
//! session itself.

use arcana_core::deck::DeckCard;
use arcana_core::error::DomainError;
use arcana_core::locale::Locale;
use arcana_core::repository::{DeckProvider, SpreadRepository};
use arcana_core::rng::DeterministicRng;
use arcana_core::spread::Spread;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::aggregates::ReadingSession;
use crate::domain::draw::DrawPolicy;

/// Fetches the spread schema and the deck for `locale`.
///
/// # Errors
///
/// Returns `DomainError::SpreadNotFound` for an unknown id, the
/// repository's error if the schema source fails, and
/// `DomainError::DeckLoadFailure` if the deck cannot be fetched.
#[instrument(skip(locale, spreads, decks), fields(locale = %locale))]
pub async fn load_spread_and_deck(
    spread_id: &str,
    locale: &Locale,
    spreads: &dyn SpreadRepository,
    decks: &dyn DeckProvider,
) -> Result<(Spread, Vec<DeckCard>), DomainError> {
    let spread = spreads
        .load_spread(spread_id)
        .await?
        .ok_or_else(|| DomainError::SpreadNotFound(spread_id.to_owned()))?;

    let deck = decks.load_deck(locale).await.map_err(|e| match e {
        DomainError::DeckLoadFailure(_) => e,
        other => DomainError::DeckLoadFailure(other.to_string()),
    })?;

    Ok((spread, deck))
}

/// Opens a new session for one spread visit. Load failures leave the
/// returned session in the `error` phase with the reason recorded.
pub async fn open_session(
    spread_id: &str,
    locale: Locale,
    policy: DrawPolicy,
    spreads: &dyn SpreadRepository,
    decks: &dyn DeckProvider,
    rng: &mut dyn DeterministicRng,
) -> ReadingSession {
    let loaded = load_spread_and_deck(spread_id, &locale, spreads, decks).await;
    let mut session = ReadingSession::new(Uuid::new_v4(), locale, policy);
    // The error is already recorded on the session.
    let _ = session.finish_loading(loaded, rng);
    session
}
