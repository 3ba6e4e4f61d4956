//! Deck records supplied by the deck provider.

use serde::{Deserialize, Serialize};

/// One physical card of a locale-bound deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCard {
    /// Identifier, unique within a deck.
    pub id: String,
    /// Card name in the deck's locale.
    pub name: String,
    /// Optional artwork location.
    #[serde(
        rename = "imageUrl",
        alias = "image_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    /// Optional short meaning text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl DeckCard {
    /// Creates a card with only an id and a name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: None,
            meaning: None,
        }
    }
}
