//! Test doubles for the interpretation service.

use std::collections::VecDeque;
use std::sync::Mutex;

use arcana_core::error::DomainError;
use arcana_core::interpretation::{
    InterpretationRequest, InterpretationResult, InterpretationService,
};
use async_trait::async_trait;

/// Answers with scripted outcomes, then with a fixed text forever. Every
/// request is recorded.
#[derive(Debug)]
pub struct StubInterpretationService {
    scripted: Mutex<VecDeque<Result<InterpretationResult, String>>>,
    text: String,
    requests: Mutex<Vec<InterpretationRequest>>,
}

impl StubInterpretationService {
    /// Always succeeds with `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            text: text.to_owned(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails `failures` times with an interpretation error, then succeeds.
    #[must_use]
    pub fn failing_first(failures: usize, text: &str) -> Self {
        let service = Self::new(text);
        {
            let mut scripted = service.scripted.lock().unwrap();
            for n in 1..=failures {
                scripted.push_back(Err(format!("upstream timeout #{n}")));
            }
        }
        service
    }

    /// Requests received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<InterpretationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InterpretationService for StubInterpretationService {
    async fn interpret(
        &self,
        request: &InterpretationRequest,
    ) -> Result<InterpretationResult, DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.scripted.lock().unwrap().pop_front();
        match next {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(DomainError::Interpretation(message)),
            None => InterpretationResult::from_value(serde_json::json!({
                "text": self.text,
                "locale": request.locale,
            })),
        }
    }
}

/// An interpretation service that is always down.
#[derive(Debug)]
pub struct FailingInterpretationService;

#[async_trait]
impl InterpretationService for FailingInterpretationService {
    async fn interpret(
        &self,
        _request: &InterpretationRequest,
    ) -> Result<InterpretationResult, DomainError> {
        Err(DomainError::Interpretation("service unavailable".into()))
    }
}
