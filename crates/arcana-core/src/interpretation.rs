//! Wire contract with the external interpretation service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::locale::Locale;

/// Spread identity as sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadRef {
    /// Spread schema id.
    pub id: String,
    /// Localized spread name.
    pub name: String,
}

/// One drawn card as the service sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDescriptor {
    /// 1-based draw order.
    pub index: usize,
    /// Localized card name.
    pub name: String,
    /// `false` when the card was drawn reversed.
    pub upright: bool,
    /// Slot key of the position the card landed on.
    pub position_key: String,
    /// Localized slot title, if the slot has one.
    pub position_title: Option<String>,
}

/// Payload sent to the interpretation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationRequest {
    /// Locale captured when the request was built.
    pub locale: Locale,
    /// Interpreter persona.
    pub persona_id: String,
    /// Spread identity.
    pub spread: SpreadRef,
    /// Human-readable description of the spread and its slots.
    pub spread_guide: Option<String>,
    /// Drawn cards in draw order.
    pub cards: Vec<CardDescriptor>,
}

/// Per-card section of a structured interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardReading {
    /// 1-based draw order the section refers to.
    pub index: usize,
    /// Prose for that card.
    pub text: String,
}

/// Interpretation returned by the service. The prose is opaque; only the
/// optional rendering fields are lifted out of the raw payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationResult {
    /// Overall reading text.
    pub text: Option<String>,
    /// Per-card breakdown.
    #[serde(default)]
    pub cards: Vec<CardReading>,
    /// The payload exactly as received.
    pub raw: serde_json::Value,
}

impl InterpretationResult {
    /// Reads a service response body.
    ///
    /// A bare JSON string becomes the overall text. Objects may carry `text`
    /// (or `summary`/`interpretation`) and a `cards` array of
    /// `{index, text}`; unknown fields are kept in `raw` only.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedResponse` for any other JSON shape or
    /// when `cards` is present but not a list of `{index, text}`.
    pub fn from_value(raw: serde_json::Value) -> Result<Self, DomainError> {
        match &raw {
            serde_json::Value::String(text) => Ok(Self {
                text: Some(text.clone()),
                cards: Vec::new(),
                raw,
            }),
            serde_json::Value::Object(map) => {
                let text = ["text", "summary", "interpretation"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
                    .map(str::to_owned);
                let cards = match map.get("cards") {
                    None | Some(serde_json::Value::Null) => Vec::new(),
                    Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                        DomainError::MalformedResponse(format!("cards: {e}"))
                    })?,
                };
                if text.is_none() && cards.is_empty() {
                    return Err(DomainError::MalformedResponse(
                        "response has neither text nor cards".to_owned(),
                    ));
                }
                Ok(Self { text, cards, raw })
            }
            other => Err(DomainError::MalformedResponse(format!(
                "unexpected response shape: {other}"
            ))),
        }
    }
}

/// Remote service that turns a draw into reading text.
#[async_trait]
pub trait InterpretationService: Send + Sync {
    /// Interprets one draw.
    async fn interpret(
        &self,
        request: &InterpretationRequest,
    ) -> Result<InterpretationResult, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_with_wire_field_names() {
        let request = InterpretationRequest {
            locale: Locale::new("en"),
            persona_id: "sage".to_owned(),
            spread: SpreadRef {
                id: "ppf-3".to_owned(),
                name: "Past, Present, Future".to_owned(),
            },
            spread_guide: None,
            cards: vec![CardDescriptor {
                index: 1,
                name: "The Fool".to_owned(),
                upright: true,
                position_key: "past".to_owned(),
                position_title: Some("Past".to_owned()),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["locale"], "en");
        assert_eq!(json["personaId"], "sage");
        assert_eq!(json["spread"]["id"], "ppf-3");
        assert!(json["spreadGuide"].is_null());
        assert_eq!(json["cards"][0]["position_key"], "past");
        assert_eq!(json["cards"][0]["position_title"], "Past");
        assert_eq!(json["cards"][0]["upright"], true);
    }

    #[test]
    fn test_from_value_accepts_string_and_structured_bodies() {
        let plain = InterpretationResult::from_value(serde_json::json!("All is well")).unwrap();
        assert_eq!(plain.text.as_deref(), Some("All is well"));

        let structured = InterpretationResult::from_value(serde_json::json!({
            "summary": "Change is coming",
            "cards": [{ "index": 1, "text": "A new start" }],
            "tone": "warm"
        }))
        .unwrap();
        assert_eq!(structured.text.as_deref(), Some("Change is coming"));
        assert_eq!(structured.cards[0].text, "A new start");
        assert_eq!(structured.raw["tone"], "warm");
    }

    #[test]
    fn test_from_value_rejects_malformed_bodies() {
        for body in [
            serde_json::json!(42),
            serde_json::json!({ "tone": "warm" }),
            serde_json::json!({ "cards": "nope" }),
        ] {
            match InterpretationResult::from_value(body).unwrap_err() {
                DomainError::MalformedResponse(_) => {}
                other => panic!("expected MalformedResponse, got {other:?}"),
            }
        }
    }
}
