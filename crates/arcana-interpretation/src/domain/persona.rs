//! Persona gating through an injected capability registry.

use std::collections::{HashMap, HashSet};

use arcana_core::locale::Locale;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reading method a persona may serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingMethod {
    Tarot,
    Oracle,
    Lenormand,
}

/// Why a persona was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("unknown persona {0}")]
    UnknownPersona(String),

    #[error("persona {persona_id} does not offer {method:?} readings")]
    MethodNotSupported {
        persona_id: String,
        method: ReadingMethod,
    },

    #[error("persona {persona_id} does not speak {locale}")]
    LocaleNotSupported { persona_id: String, locale: Locale },
}

/// Decides whether a persona may interpret a reading.
pub trait PersonaRegistry: Send + Sync {
    /// `None` when eligible, otherwise the reason for refusal.
    fn is_persona_eligible(
        &self,
        persona_id: &str,
        method: ReadingMethod,
        locale: &Locale,
    ) -> Option<RejectionReason>;
}

/// What one persona supports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaCapabilities {
    /// Methods the persona reads.
    pub methods: HashSet<ReadingMethod>,
    /// Locale tags or language subtags; empty means every locale.
    #[serde(default)]
    pub locales: HashSet<String>,
}

impl PersonaCapabilities {
    fn speaks(&self, locale: &Locale) -> bool {
        self.locales.is_empty()
            || self.locales.contains(locale.as_str())
            || self.locales.contains(locale.language())
    }
}

/// Registry backed by a fixed table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticPersonaRegistry {
    #[serde(flatten)]
    personas: HashMap<String, PersonaCapabilities>,
    #[serde(skip)]
    open: bool,
}

impl StaticPersonaRegistry {
    /// An empty registry; every persona is unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts any persona for any method and locale. For hosts that do not
    /// configure personas.
    #[must_use]
    pub fn open() -> Self {
        Self {
            personas: HashMap::new(),
            open: true,
        }
    }

    /// Adds or replaces a persona.
    #[must_use]
    pub fn with_persona(mut self, persona_id: &str, capabilities: PersonaCapabilities) -> Self {
        self.personas.insert(persona_id.to_owned(), capabilities);
        self
    }

    /// Number of configured personas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.personas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl PersonaRegistry for StaticPersonaRegistry {
    fn is_persona_eligible(
        &self,
        persona_id: &str,
        method: ReadingMethod,
        locale: &Locale,
    ) -> Option<RejectionReason> {
        let Some(capabilities) = self.personas.get(persona_id) else {
            return (!self.open).then(|| RejectionReason::UnknownPersona(persona_id.to_owned()));
        };
        if !capabilities.methods.contains(&method) {
            return Some(RejectionReason::MethodNotSupported {
                persona_id: persona_id.to_owned(),
                method,
            });
        }
        if !capabilities.speaks(locale) {
            return Some(RejectionReason::LocaleNotSupported {
                persona_id: persona_id.to_owned(),
                locale: locale.clone(),
            });
        }
        None
    }
}
