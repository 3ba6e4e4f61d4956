//! Canned spreads and decks.

use std::collections::BTreeMap;

use arcana_core::deck::DeckCard;
use arcana_core::locale::LocalizedText;
use arcana_core::spread::Spread;

/// A deck of `size` distinct cards named `Card 1` … `Card {size}`.
#[must_use]
pub fn sample_deck(size: usize) -> Vec<DeckCard> {
    (1..=size)
        .map(|n| DeckCard::new(format!("card-{n:02}"), format!("Card {n}")))
        .collect()
}

/// A spread with English and Spanish names and no authored positions.
#[must_use]
pub fn sample_spread(
    id: &str,
    cards_required: usize,
    allow_reversals: bool,
    layout: &str,
) -> Spread {
    Spread {
        id: id.to_owned(),
        cards_required,
        allow_reversals,
        name: LocalizedText::from_pairs([
            ("en", format!("Spread {id}")),
            ("es", format!("Tirada {id}")),
        ]),
        ui_copy: BTreeMap::new(),
        layout: Some(layout.to_owned()),
        guide: LocalizedText::default(),
        positions: None,
    }
}
