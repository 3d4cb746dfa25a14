//! Model client seam
//!
//! The adapter only needs "send a prompt with a temperature, get text back".
//! [`ModelClient`] is that contract; [`super::gemini::GeminiModelClient`] is
//! the production implementation and tests substitute their own.

use async_trait::async_trait;

use super::errors::ModelError;
use crate::models::GenerationVariant;

/// Per-invocation model configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    pub temperature: f32,
}

impl ModelConfig {
    #[must_use]
    pub const fn for_variant(variant: GenerationVariant) -> Self {
        Self {
            temperature: variant.temperature(),
        }
    }
}

/// Raw model output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    text: String,
}

impl ModelResponse {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A hosted generative model
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate text for `prompt`
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the service cannot be reached, rejects the
    /// request, or answers without any text.
    async fn generate(&self, prompt: &str, config: &ModelConfig)
        -> Result<ModelResponse, ModelError>;
}
