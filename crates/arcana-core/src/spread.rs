//! Spread schemas as authored externally, and resolved position slots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::locale::{Locale, LocalizedText};

/// Per-locale UI copy attached to a spread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiCopy {
    /// Short line shown under the spread name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

/// A named template: how many cards a reading uses and where they go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    /// Schema identifier, e.g. `ppf-3`.
    pub id: String,
    /// Number of cards the reading draws.
    pub cards_required: usize,
    /// Whether drawn cards may land reversed.
    #[serde(default)]
    pub allow_reversals: bool,
    /// Display name per locale.
    #[serde(default)]
    pub name: LocalizedText,
    /// UI copy per locale.
    #[serde(default)]
    pub ui_copy: BTreeMap<String, UiCopy>,
    /// Layout kind used when no explicit positions are authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// Free-form reading guide per locale.
    #[serde(default)]
    pub guide: LocalizedText,
    /// Hand-authored positions; take precedence over the layout kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<RawPosition>>,
}

impl Spread {
    /// Checks the schema-level constraints.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is blank or
    /// `cards_required` is zero.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::Validation("spread id must not be blank".to_owned()));
        }
        if self.cards_required == 0 {
            return Err(DomainError::Validation(format!(
                "spread {} must require at least one card",
                self.id
            )));
        }
        Ok(())
    }

    /// Display name for `locale`, falling back to the id.
    #[must_use]
    pub fn display_name(&self, locale: &Locale) -> String {
        self.name
            .get(locale)
            .map_or_else(|| self.id.clone(), str::to_owned)
    }

    /// Subtitle copy for `locale`, with the same fallback chain as
    /// [`LocalizedText::get`].
    #[must_use]
    pub fn subtitle(&self, locale: &Locale) -> Option<&str> {
        let copy = self
            .ui_copy
            .get(locale.as_str())
            .or_else(|| self.ui_copy.get(locale.language()))
            .or_else(|| self.ui_copy.get(crate::locale::DEFAULT_LOCALE))
            .or_else(|| self.ui_copy.values().next())?;
        copy.subtitle.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Externally authored position data. Field names vary between authoring
/// tools, so every field accepts several aliases and may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    /// Slot key.
    #[serde(default, alias = "slotKey", alias = "key", skip_serializing_if = "Option::is_none")]
    pub slot_key: Option<String>,
    /// 1-based order.
    #[serde(default, alias = "index", alias = "order", skip_serializing_if = "Option::is_none")]
    pub idx: Option<usize>,
    /// Horizontal center, either 0–1 or 0–100.
    #[serde(
        default,
        alias = "cx",
        alias = "center_x",
        alias = "centerX",
        alias = "left",
        skip_serializing_if = "Option::is_none"
    )]
    pub x: Option<f64>,
    /// Vertical center, either 0–1 or 0–100.
    #[serde(
        default,
        alias = "cy",
        alias = "center_y",
        alias = "centerY",
        alias = "top",
        skip_serializing_if = "Option::is_none"
    )]
    pub y: Option<f64>,
    /// Rotation in degrees.
    #[serde(default, alias = "rotation", alias = "angle", skip_serializing_if = "Option::is_none")]
    pub rot: Option<f64>,
    /// Stacking order.
    #[serde(default, alias = "z_index", alias = "zIndex", skip_serializing_if = "Option::is_none")]
    pub z: Option<u32>,
    /// Slot title per locale.
    #[serde(default)]
    pub title: LocalizedText,
    /// Meaning of an upright card in this slot.
    #[serde(default, alias = "uprightCopy")]
    pub upright_copy: LocalizedText,
    /// Meaning of a reversed card in this slot.
    #[serde(default, alias = "reversedCopy")]
    pub reversed_copy: LocalizedText,
}

/// A resolved placement within a spread, in normalized board coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadPosition {
    /// Unique within the spread.
    pub slot_key: String,
    /// 1-based order; also the draw order.
    pub idx: usize,
    /// Horizontal center in `[0, 1]`.
    pub x: f64,
    /// Vertical center in `[0, 1]`.
    pub y: f64,
    /// Rotation in degrees.
    pub rot: f64,
    /// Stacking order; higher renders on top.
    pub z: u32,
    /// Slot title per locale.
    #[serde(default)]
    pub title: LocalizedText,
    /// Upright meaning per locale.
    #[serde(default)]
    pub upright_copy: LocalizedText,
    /// Reversed meaning per locale.
    #[serde(default)]
    pub reversed_copy: LocalizedText,
}

impl SpreadPosition {
    /// A generated slot with no authored copy.
    #[must_use]
    pub fn at(idx: usize, x: f64, y: f64) -> Self {
        Self {
            slot_key: format!("p{idx}"),
            idx,
            x,
            y,
            rot: 0.0,
            z: u32::try_from(idx).unwrap_or(u32::MAX),
            title: LocalizedText::default(),
            upright_copy: LocalizedText::default(),
            reversed_copy: LocalizedText::default(),
        }
    }
}
