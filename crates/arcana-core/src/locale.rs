//! Locale identifiers and per-locale copy.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Locale used when a map has no entry for the requested one.
pub const DEFAULT_LOCALE: &str = "en";

/// Active display/interpretation language, e.g. `en` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Creates a locale from any tag; surrounding whitespace is dropped.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        let tag: String = tag.into();
        Self(tag.trim().to_owned())
    }

    /// Returns the raw tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`pt` for `pt-BR`).
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or(&self.0)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(DEFAULT_LOCALE.to_owned())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// A string keyed by locale tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    /// Builds copy from `(locale, text)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Looks up copy for `locale`, falling back to its language, then to
    /// [`DEFAULT_LOCALE`], then to any entry at all. Blank entries are
    /// skipped at every step.
    #[must_use]
    pub fn get(&self, locale: &Locale) -> Option<&str> {
        let usable = |key: &str| {
            self.0
                .get(key)
                .map(String::as_str)
                .filter(|text| !text.trim().is_empty())
        };
        usable(locale.as_str())
            .or_else(|| usable(locale.language()))
            .or_else(|| usable(DEFAULT_LOCALE))
            .or_else(|| {
                self.0
                    .values()
                    .map(String::as_str)
                    .find(|text| !text.trim().is_empty())
            })
    }

    /// Returns `true` when no locale has copy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|text| text.trim().is_empty())
    }
}
