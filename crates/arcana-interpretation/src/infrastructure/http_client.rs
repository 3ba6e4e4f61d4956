//! HTTP client for the interpretation service.
//!
//! POSTs the request as JSON to a single endpoint and reads the body with
//! [`InterpretationResult::from_value`].

use std::time::Duration;

use arcana_core::error::DomainError;
use arcana_core::interpretation::{
    InterpretationRequest, InterpretationResult, InterpretationService,
};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Default request timeout. Interpretations are generated text and can be
/// slow.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Interpretation service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpInterpretationService {
    client: Client,
    endpoint: String,
}

impl HttpInterpretationService {
    /// Creates a client posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the endpoint is blank or the
    /// HTTP client cannot be built.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, DomainError> {
        let endpoint = endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(DomainError::Infrastructure(
                "interpretation endpoint is empty".into(),
            ));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InterpretationService for HttpInterpretationService {
    async fn interpret(
        &self,
        request: &InterpretationRequest,
    ) -> Result<InterpretationResult, DomainError> {
        debug!(endpoint = %self.endpoint, cards = request.cards.len(), "posting interpretation request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::Interpretation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Interpretation(format!(
                "service returned {status}: {}",
                body.trim()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DomainError::MalformedResponse(e.to_string()))?;

        InterpretationResult::from_value(body)
    }
}
