//! The draw: selected cards onto position slots, with orientation.

use arcana_core::deck::DeckCard;
use arcana_core::rng::DeterministicRng;
use arcana_core::spread::SpreadPosition;
use serde::{Deserialize, Serialize};

/// Chance that a card lands reversed when the spread allows reversals.
pub const REVERSAL_PROBABILITY: f64 = 0.3;

/// Tunable draw parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPolicy {
    /// Per-card reversal chance, in `[0, 1]`.
    pub reversal_probability: f64,
}

impl Default for DrawPolicy {
    fn default() -> Self {
        Self {
            reversal_probability: REVERSAL_PROBABILITY,
        }
    }
}

/// A card placed on a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawnCard {
    pub position_slot_key: String,
    pub card: DeckCard,
    pub is_reversed: bool,
    /// 1-based draw order.
    pub index: usize,
}

/// Places `selected` cards of `shuffled` on `positions`, in selection order.
///
/// Each card is reversed independently with the policy's probability when
/// `allow_reversals` is set, and upright otherwise. Indices outside the deck
/// and selections beyond the slot count are skipped; callers guarantee
/// neither happens.
#[must_use]
pub fn draw_cards(
    shuffled: &[DeckCard],
    selected: &[usize],
    positions: &[SpreadPosition],
    allow_reversals: bool,
    policy: DrawPolicy,
    rng: &mut dyn DeterministicRng,
) -> Vec<DrawnCard> {
    selected
        .iter()
        .filter_map(|&i| shuffled.get(i))
        .zip(positions)
        .enumerate()
        .map(|(n, (card, slot))| DrawnCard {
            position_slot_key: slot.slot_key.clone(),
            card: card.clone(),
            is_reversed: allow_reversals && rng.next_f64() < policy.reversal_probability,
            index: n + 1,
        })
        .collect()
}
