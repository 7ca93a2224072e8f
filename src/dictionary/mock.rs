use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::Dictionary;
use crate::consts::DEFINITION_NOT_FOUND;
use crate::error::LookupError;

/// What a [`MockDictionary`] answers.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Found(String),
    NotFound,
    Fail(String),
}

/// A scripted dictionary for tests. Answers every lookup the same way,
/// optionally after a delay.
pub struct MockDictionary {
    outcome: MockOutcome,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockDictionary {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn found(text: &str) -> Self {
        Self::new(MockOutcome::Found(text.to_string()))
    }

    pub fn not_found() -> Self {
        Self::new(MockOutcome::NotFound)
    }

    pub fn failing(reason: &str) -> Self {
        Self::new(MockOutcome::Fail(reason.to_string()))
    }

    /// Sleep this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of lookups performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Dictionary for MockDictionary {
    async fn lookup(&self, _word: &str) -> Result<String, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            MockOutcome::Found(text) => Ok(text.clone()),
            MockOutcome::NotFound => Ok(DEFINITION_NOT_FOUND.to_string()),
            MockOutcome::Fail(reason) => Err(LookupError::Request(reason.clone())),
        }
    }
}
