//! Builds the service payload from a confirmed draw.

use arcana_core::interpretation::{CardDescriptor, InterpretationRequest, SpreadRef};
use arcana_core::locale::Locale;
use arcana_core::spread::{Spread, SpreadPosition};
use arcana_session::domain::aggregates::{ReadingSession, SessionPhase};
use arcana_session::domain::errors::SessionError;

/// Packages the session's draw for `persona_id` in the session's locale.
///
/// # Errors
///
/// Returns `SessionError::NotReading` unless the session holds a confirmed
/// draw, and `SessionError::DeckLocaleMismatch` while card names are still
/// in another locale.
pub fn build_request(
    session: &ReadingSession,
    persona_id: &str,
) -> Result<InterpretationRequest, SessionError> {
    let spread = match session.spread() {
        Some(spread) if session.phase() == SessionPhase::Reading => spread,
        _ => return Err(SessionError::NotReading),
    };
    session.check_deck_locale()?;
    let locale = session.locale();
    let positions = session.positions();

    let cards = session
        .draw()
        .iter()
        .map(|drawn| {
            let position = positions
                .iter()
                .find(|p| p.slot_key == drawn.position_slot_key);
            CardDescriptor {
                index: drawn.index,
                name: drawn.card.name.clone(),
                upright: !drawn.is_reversed,
                position_key: drawn.position_slot_key.clone(),
                position_title: position
                    .and_then(|p| p.title.get(locale))
                    .map(str::to_owned),
            }
        })
        .collect();

    Ok(InterpretationRequest {
        locale: locale.clone(),
        persona_id: persona_id.to_owned(),
        spread: SpreadRef {
            id: spread.id.clone(),
            name: spread.display_name(locale),
        },
        spread_guide: build_spread_guide(spread, &positions, locale),
        cards,
    })
}

/// Describes the spread and its slots in prose, or `None` when nothing is
/// authored for `locale`.
#[must_use]
pub fn build_spread_guide(
    spread: &Spread,
    positions: &[SpreadPosition],
    locale: &Locale,
) -> Option<String> {
    let mut guide = String::new();
    if let Some(text) = spread.guide.get(locale) {
        guide.push_str(text.trim());
    } else if let Some(subtitle) = spread.subtitle(locale) {
        guide.push_str(subtitle.trim());
    }

    for position in positions {
        let Some(title) = position.title.get(locale) else {
            continue;
        };
        if !guide.is_empty() {
            guide.push('\n');
        }
        guide.push_str(&format!("{}. {}", position.idx, title.trim()));
        if let Some(upright) = position.upright_copy.get(locale) {
            guide.push_str(&format!(" | upright: {}", upright.trim()));
        }
        if let Some(reversed) = position.reversed_copy.get(locale) {
            guide.push_str(&format!(" | reversed: {}", reversed.trim()));
        }
    }

    (!guide.is_empty()).then_some(guide)
}
