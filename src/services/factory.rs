//! Service factory for creating the configured application services
//!
//! Builds the model client, identity verifier, generation adapter and session
//! resolver once at start-up. All of them share a single [`EventBus`].

use anyhow::Context;
use std::sync::Arc;

use crate::events::EventBus;
use crate::generation::{GeminiModelClient, GenerationAdapter, ModelClient, RetryPolicy};
use crate::identity::{HttpIdentityVerifier, IdentityVerifier, SessionIdentityResolver};
use crate::settings::{GenerationSettings, IdentitySettings, SuiteSettings};

use super::dependency_injection::{ServiceConfigBuilder, ServiceContainer};

/// Factory for creating application services with dependency injection
pub struct ServiceFactory;

impl ServiceFactory {
    /// Create a container with the production model client and verifier
    ///
    /// # Errors
    ///
    /// Returns an error if the configured model or verification URLs are invalid
    pub fn create_container(settings: SuiteSettings) -> anyhow::Result<ServiceContainer> {
        ServiceConfigBuilder::new().build(settings)
    }

    /// Create the production model client
    ///
    /// # Errors
    ///
    /// Returns an error if the model base URL cannot be parsed
    pub fn create_model_client(
        settings: &GenerationSettings,
    ) -> anyhow::Result<Arc<dyn ModelClient>> {
        let client = GeminiModelClient::from_settings(settings)
            .context("Failed to create generation model client")?;
        log::info!(
            "✅ Generation model client configured for {}",
            settings.model
        );
        Ok(Arc::new(client))
    }

    /// Create the production identity verifier
    ///
    /// # Errors
    ///
    /// Returns an error if the verification URL cannot be parsed
    pub fn create_identity_verifier(
        settings: &IdentitySettings,
    ) -> anyhow::Result<Arc<dyn IdentityVerifier>> {
        let verifier = HttpIdentityVerifier::from_settings(settings)
            .context("Failed to create identity verifier")?;
        log::info!("✅ Identity verifier configured");
        log::info!("   └─ Verification endpoint: {}", settings.verify_url);
        Ok(Arc::new(verifier))
    }

    /// Wrap a model client in an adapter using the configured retry policy
    #[must_use]
    pub fn create_generation_adapter(
        settings: &GenerationSettings,
        client: Arc<dyn ModelClient>,
        events: EventBus,
    ) -> GenerationAdapter {
        let policy = RetryPolicy::from_settings(settings);
        if policy.max_retries > 0 || policy.timeout.is_some() {
            log::info!(
                "   └─ Retry policy: {} retries, timeout {:?}",
                policy.max_retries,
                policy.timeout
            );
        }
        GenerationAdapter::new(client, events).with_retry_policy(policy)
    }

    /// Wrap a verifier in a resolver reading the configured cookie
    #[must_use]
    pub fn create_session_resolver(
        settings: &IdentitySettings,
        verifier: Arc<dyn IdentityVerifier>,
        events: EventBus,
    ) -> SessionIdentityResolver {
        SessionIdentityResolver::new(verifier, events).with_cookie_name(&settings.cookie_name)
    }
}
