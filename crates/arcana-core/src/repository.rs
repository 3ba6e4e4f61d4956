//! Ports for the spread schema source and the deck provider.

use async_trait::async_trait;

use crate::deck::DeckCard;
use crate::error::DomainError;
use crate::locale::Locale;
use crate::spread::Spread;

/// Read-only source of spread schemas.
#[async_trait]
pub trait SpreadRepository: Send + Sync {
    /// Loads a spread by id. `Ok(None)` means the id is unknown.
    async fn load_spread(&self, spread_id: &str) -> Result<Option<Spread>, DomainError>;

    /// Number of spreads the source can serve.
    async fn count_spreads(&self) -> Result<usize, DomainError>;
}

/// Supplies the ordered, locale-bound card list for a reading.
#[async_trait]
pub trait DeckProvider: Send + Sync {
    /// Loads the deck whose card names are in `locale`.
    async fn load_deck(&self, locale: &Locale) -> Result<Vec<DeckCard>, DomainError>;
}
