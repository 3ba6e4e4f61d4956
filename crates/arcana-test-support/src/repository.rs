//! Test adapters for the spread and deck ports.

use std::collections::HashMap;
use std::sync::Mutex;

use arcana_core::deck::DeckCard;
use arcana_core::error::DomainError;
use arcana_core::locale::Locale;
use arcana_core::repository::{DeckProvider, SpreadRepository};
use arcana_core::spread::Spread;
use async_trait::async_trait;

/// Spreads held in memory, keyed by id.
#[derive(Debug, Default)]
pub struct InMemorySpreadRepository {
    spreads: HashMap<String, Spread>,
}

impl InMemorySpreadRepository {
    /// Creates a repository containing `spreads`.
    #[must_use]
    pub fn new(spreads: impl IntoIterator<Item = Spread>) -> Self {
        Self {
            spreads: spreads.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }
}

#[async_trait]
impl SpreadRepository for InMemorySpreadRepository {
    async fn load_spread(&self, spread_id: &str) -> Result<Option<Spread>, DomainError> {
        Ok(self.spreads.get(spread_id).cloned())
    }

    async fn count_spreads(&self) -> Result<usize, DomainError> {
        Ok(self.spreads.len())
    }
}

/// A spread source that always fails.
#[derive(Debug)]
pub struct FailingSpreadRepository;

#[async_trait]
impl SpreadRepository for FailingSpreadRepository {
    async fn load_spread(&self, _spread_id: &str) -> Result<Option<Spread>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn count_spreads(&self) -> Result<usize, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// Returns the same deck for every locale and records which locales were
/// requested.
#[derive(Debug)]
pub struct StaticDeckProvider {
    deck: Vec<DeckCard>,
    requested: Mutex<Vec<Locale>>,
}

impl StaticDeckProvider {
    /// Creates a provider serving `deck`.
    #[must_use]
    pub fn new(deck: Vec<DeckCard>) -> Self {
        Self {
            deck,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Returns the locales passed to `load_deck`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested_locales(&self) -> Vec<Locale> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeckProvider for StaticDeckProvider {
    async fn load_deck(&self, locale: &Locale) -> Result<Vec<DeckCard>, DomainError> {
        self.requested.lock().unwrap().push(locale.clone());
        Ok(self.deck.clone())
    }
}

/// Serves `size` cards whose names carry the requested locale, e.g.
/// `Card 3 [es]`. Ids are the same in every locale.
#[derive(Debug)]
pub struct LocalizedDeckProvider {
    size: usize,
}

impl LocalizedDeckProvider {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

#[async_trait]
impl DeckProvider for LocalizedDeckProvider {
    async fn load_deck(&self, locale: &Locale) -> Result<Vec<DeckCard>, DomainError> {
        Ok((1..=self.size)
            .map(|n| DeckCard::new(format!("card-{n:02}"), format!("Card {n} [{locale}]")))
            .collect())
    }
}

/// A deck provider that always fails.
#[derive(Debug)]
pub struct FailingDeckProvider;

#[async_trait]
impl DeckProvider for FailingDeckProvider {
    async fn load_deck(&self, _locale: &Locale) -> Result<Vec<DeckCard>, DomainError> {
        Err(DomainError::Infrastructure("deck host unreachable".into()))
    }
}
