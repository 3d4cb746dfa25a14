//! Test fixtures providing pre-built settings and service containers

use std::sync::Arc;

use crate::events::EventBus;
use crate::generation::ModelClient;
use crate::identity::IdentityVerifier;
use crate::services::{ServiceConfigBuilder, ServiceContainer};
use crate::settings::{ErrorMapping, SuiteSettings};

use super::constants::{TEST_API_KEY, TEST_VERIFY_URL};
use super::mock::{MockIdentityVerifier, MockModelClient};

/// Central fixture provider for test data
pub struct TestFixtures;

impl TestFixtures {
    /// Settings pointing at unreachable local collaborators
    #[must_use]
    pub fn settings() -> SuiteSettings {
        let mut settings = SuiteSettings::default();
        settings.generation.api_key = TEST_API_KEY.to_string();
        settings.identity.verify_url = TEST_VERIFY_URL.to_string();
        settings
    }

    /// Settings with the refined error-status mapping
    #[must_use]
    pub fn refined_settings() -> SuiteSettings {
        let mut settings = Self::settings();
        settings.generation.error_mapping = ErrorMapping::Refined;
        settings
    }

    /// Container wired to the given doubles with default test settings
    ///
    /// # Panics
    ///
    /// Panics if the container cannot be built.
    #[must_use]
    pub fn container_with(
        model: Arc<dyn ModelClient>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> ServiceContainer {
        Self::container_with_settings(Self::settings(), model, verifier, EventBus::default())
    }

    /// Container wired to the given doubles, settings and event bus
    ///
    /// # Panics
    ///
    /// Panics if the container cannot be built.
    #[must_use]
    pub fn container_with_settings(
        settings: SuiteSettings,
        model: Arc<dyn ModelClient>,
        verifier: Arc<dyn IdentityVerifier>,
        events: EventBus,
    ) -> ServiceContainer {
        ServiceConfigBuilder::new()
            .with_model_client(model)
            .with_identity_verifier(verifier)
            .with_event_bus(events)
            .build(settings)
            .unwrap()
    }

    /// Container whose model answers `text` and whose verifier accepts any token
    #[must_use]
    pub fn container_returning(text: &str) -> ServiceContainer {
        Self::container_with(
            Arc::new(MockModelClient::returning(text)),
            Arc::new(MockIdentityVerifier::accepting(super::constants::TEST_UID)),
        )
    }
}
