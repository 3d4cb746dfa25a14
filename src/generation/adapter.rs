use serde_json::Value;
use std::sync::Arc;

use super::client::{ModelClient, ModelConfig};
use super::errors::GenerationError;
use super::prompts;
use super::resilience::RetryPolicy;
use crate::events::{EventBus, EventKind};
use crate::models::{
    FlowchartRequest, FormRequest, GenerationRequest, GenerationResult, GenerationVariant,
    ImageRequest, SearchRequest, SummaryRequest,
};
use crate::utils::logging::LoggingHelper;

/// Turns validated generation requests into structured model output
///
/// Inputs are assumed valid; field presence is checked by the HTTP layer.
#[derive(Clone)]
pub struct GenerationAdapter {
    client: Arc<dyn ModelClient>,
    policy: RetryPolicy,
    events: EventBus,
}

impl GenerationAdapter {
    #[must_use]
    pub fn new(client: Arc<dyn ModelClient>, events: EventBus) -> Self {
        Self {
            client,
            policy: RetryPolicy::default(),
            events,
        }
    }

    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Generate a flowchart description
    ///
    /// # Errors
    ///
    /// See [`GenerationAdapter::generate`].
    pub async fn generate_flowchart(
        &self,
        request: &FlowchartRequest,
    ) -> Result<GenerationResult, GenerationError> {
        self.run(GenerationVariant::Flowchart, prompts::flowchart_prompt(request))
            .await
    }

    /// Generate an image brief
    ///
    /// # Errors
    ///
    /// See [`GenerationAdapter::generate`].
    pub async fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> Result<GenerationResult, GenerationError> {
        self.run(GenerationVariant::Image, prompts::image_prompt(request))
            .await
    }

    /// Generate search conditions plus a logic operator
    ///
    /// # Errors
    ///
    /// See [`GenerationAdapter::generate`].
    pub async fn generate_search_query(
        &self,
        request: &SearchRequest,
    ) -> Result<GenerationResult, GenerationError> {
        self.run(GenerationVariant::Search, prompts::search_prompt(request))
            .await
    }

    /// Generate a form schema
    ///
    /// # Errors
    ///
    /// See [`GenerationAdapter::generate`].
    pub async fn generate_form(
        &self,
        request: &FormRequest,
    ) -> Result<GenerationResult, GenerationError> {
        self.run(GenerationVariant::Form, prompts::form_prompt(request))
            .await
    }

    /// Generate a summary
    ///
    /// # Errors
    ///
    /// See [`GenerationAdapter::generate`].
    pub async fn generate_summary(
        &self,
        request: &SummaryRequest,
    ) -> Result<GenerationResult, GenerationError> {
        self.run(GenerationVariant::Summary, prompts::summary_prompt(request))
            .await
    }

    /// Dispatch any request variant
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Service`] if the model call fails and
    /// [`GenerationError::MalformedOutput`] if the model's text is not a JSON
    /// object. Neither is retried beyond the configured [`RetryPolicy`].
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        match request {
            GenerationRequest::Flowchart(r) => self.generate_flowchart(r).await,
            GenerationRequest::Image(r) => self.generate_image(r).await,
            GenerationRequest::Search(r) => self.generate_search_query(r).await,
            GenerationRequest::Form(r) => self.generate_form(r).await,
            GenerationRequest::Summary(r) => self.generate_summary(r).await,
        }
    }

    async fn run(
        &self,
        variant: GenerationVariant,
        prompt: String,
    ) -> Result<GenerationResult, GenerationError> {
        let config = ModelConfig::for_variant(variant);
        LoggingHelper::log_generation_start(variant, prompt.len());

        let outcome = match self
            .policy
            .execute(|| self.client.generate(&prompt, &config))
            .await
        {
            Ok(response) => parse_generation_output(response.text()),
            Err(e) => Err(GenerationError::Service(e)),
        };

        match &outcome {
            Ok(result) => LoggingHelper::log_generation_success(variant, result.len()),
            Err(error) => {
                let message = error.to_string();
                LoggingHelper::log_generation_failure(variant, &message);
                self.events
                    .publish(EventKind::GenerationFailed { variant, message });
            }
        }
        outcome
    }
}

/// Parse raw model text into a JSON object
///
/// # Errors
///
/// Returns [`GenerationError::MalformedOutput`] if the text is not JSON or is
/// JSON other than an object.
pub fn parse_generation_output(text: &str) -> Result<GenerationResult, GenerationError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(GenerationError::MalformedOutput(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(GenerationError::MalformedOutput(e.to_string())),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
