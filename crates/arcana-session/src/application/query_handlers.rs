//! Read-only views of a session.

use arcana_core::interpretation::InterpretationResult;
use arcana_core::locale::Locale;
use arcana_core::spread::SpreadPosition;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::{InterpretationStatus, ReadingSession, SessionPhase};
use crate::domain::draw::DrawnCard;

/// Snapshot of a session for rendering.
///
/// The shuffled deck is face down while picking, so only its size is
/// exposed.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub phase: SessionPhase,
    pub locale: Locale,
    /// Locale the card names are in; differs from `locale` until the deck
    /// is reloaded.
    pub deck_locale: Locale,
    pub spread_id: Option<String>,
    pub spread_name: Option<String>,
    pub subtitle: Option<String>,
    pub cards_required: usize,
    pub deck_size: usize,
    pub selected_indices: Vec<usize>,
    pub can_confirm: bool,
    pub positions: Vec<SpreadPosition>,
    pub draw: Vec<DrawnCard>,
    pub drawn_at: Option<DateTime<Utc>>,
    pub interpretation_status: InterpretationStatus,
    pub interpretation: Option<InterpretationResult>,
    pub request_locale: Option<Locale>,
    pub error: Option<String>,
}

/// Builds the view of `session`, with copy in the session's locale.
#[must_use]
pub fn session_view(session: &ReadingSession) -> SessionView {
    let locale = session.locale();
    let spread = session.spread();
    SessionView {
        session_id: session.id(),
        phase: session.phase(),
        locale: locale.clone(),
        deck_locale: session.deck_locale().clone(),
        spread_id: spread.map(|s| s.id.clone()),
        spread_name: spread.map(|s| s.display_name(locale)),
        subtitle: spread.and_then(|s| s.subtitle(locale)).map(str::to_owned),
        cards_required: session.cards_required(),
        deck_size: session.shuffled_deck().len(),
        selected_indices: session.selected_indices().to_vec(),
        can_confirm: session.can_confirm(),
        positions: session.positions().to_vec(),
        draw: session.draw().to_vec(),
        drawn_at: session.drawn_at(),
        interpretation_status: session.interpretation_status().clone(),
        interpretation: session.interpretation().cloned(),
        request_locale: session.request_locale().cloned(),
        error: session.load_error().map(str::to_owned),
    }
}
