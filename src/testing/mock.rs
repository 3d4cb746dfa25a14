//! Mock collaborators for isolated testing
//!
//! Both doubles record every call so tests can assert on call counts and on
//! the exact arguments the production code passed.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::generation::{ModelClient, ModelConfig, ModelError, ModelResponse};
use crate::identity::{IdentityVerificationError, IdentityVerifier, VerifiedSession};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A single recorded call to [`MockModelClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedModelCall {
    pub prompt: String,
    pub config: ModelConfig,
}

/// Model client double with scripted outcomes
///
/// Queued outcomes are consumed first; once the queue is empty every call
/// gets the fallback outcome.
pub struct MockModelClient {
    queued: Mutex<VecDeque<Result<String, ModelError>>>,
    fallback: Result<String, ModelError>,
    calls: Mutex<Vec<RecordedModelCall>>,
}

impl MockModelClient {
    fn with_fallback(fallback: Result<String, ModelError>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `text`
    #[must_use]
    pub fn returning(text: impl Into<String>) -> Self {
        Self::with_fallback(Ok(text.into()))
    }

    /// Always fail with `error`
    #[must_use]
    pub fn failing(error: ModelError) -> Self {
        Self::with_fallback(Err(error))
    }

    /// Fail with `error` before any previously queued outcome
    #[must_use]
    pub fn with_initial_failure(self, error: ModelError) -> Self {
        lock(&self.queued).push_front(Err(error));
        self
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedModelCall> {
        lock(&self.calls).clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// The prompt of the most recent call
    #[must_use]
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.calls).last().map(|call| call.prompt.clone())
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn generate(
        &self,
        prompt: &str,
        config: &ModelConfig,
    ) -> Result<ModelResponse, ModelError> {
        lock(&self.calls).push(RecordedModelCall {
            prompt: prompt.to_string(),
            config: *config,
        });
        let outcome = lock(&self.queued)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        outcome.map(ModelResponse::new)
    }
}

/// A single recorded call to [`MockIdentityVerifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedVerification {
    pub token: String,
    pub check_revoked: bool,
}

/// Identity verifier double with a fixed outcome
pub struct MockIdentityVerifier {
    outcome: Result<VerifiedSession, IdentityVerificationError>,
    calls: Mutex<Vec<RecordedVerification>>,
}

impl MockIdentityVerifier {
    /// Accept every token as belonging to `uid`
    #[must_use]
    pub fn accepting(uid: impl Into<String>) -> Self {
        Self {
            outcome: Ok(VerifiedSession { uid: uid.into() }),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reject every token with `error`
    #[must_use]
    pub fn rejecting(error: IdentityVerificationError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedVerification> {
        lock(&self.calls).clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl IdentityVerifier for MockIdentityVerifier {
    async fn verify_session_cookie(
        &self,
        token: &str,
        check_revoked: bool,
    ) -> Result<VerifiedSession, IdentityVerificationError> {
        lock(&self.calls).push(RecordedVerification {
            token: token.to_string(),
            check_revoked,
        });
        self.outcome.clone()
    }
}
