//! Localized decks stored as `<dir>/<locale>.json`.

use std::path::{Path, PathBuf};

use arcana_core::deck::DeckCard;
use arcana_core::error::DomainError;
use arcana_core::locale::{DEFAULT_LOCALE, Locale};
use arcana_core::repository::DeckProvider;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Serves decks from a directory of JSON arrays, one file per locale.
///
/// A request for `pt-BR` tries `pt-BR.json`, then `pt.json`, then the
/// default locale's file.
#[derive(Debug, Clone)]
pub struct FileDeckProvider {
    dir: PathBuf,
}

impl FileDeckProvider {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn candidates(&self, locale: &Locale) -> Vec<PathBuf> {
        let mut tags: Vec<&str> = Vec::with_capacity(3);
        for tag in [locale.as_str(), locale.language(), DEFAULT_LOCALE] {
            if is_safe_tag(tag) && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags.into_iter()
            .map(|tag| self.dir.join(format!("{tag}.json")))
            .collect()
    }
}

/// Locale tags become file names; anything but letters, digits, `-` and `_`
/// is refused.
fn is_safe_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[async_trait]
impl DeckProvider for FileDeckProvider {
    #[instrument(skip(self), fields(locale = %locale))]
    async fn load_deck(&self, locale: &Locale) -> Result<Vec<DeckCard>, DomainError> {
        for path in self.candidates(locale) {
            let contents = match tokio::fs::read_to_string(&path).await {
                Ok(contents) => contents,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(DomainError::DeckLoadFailure(format!(
                        "cannot read {}: {e}",
                        path.display()
                    )));
                }
            };
            let deck: Vec<DeckCard> = serde_json::from_str(&contents).map_err(|e| {
                DomainError::DeckLoadFailure(format!("{}: {e}", path.display()))
            })?;
            debug!(path = %path.display(), cards = deck.len(), "deck loaded");
            return Ok(deck);
        }

        Err(DomainError::DeckLoadFailure(format!(
            "no deck for locale {locale} in {}",
            self.dir.display()
        )))
    }
}
