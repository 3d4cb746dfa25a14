//! Dependency injection for the HTTP layer
//!
//! [`ServiceConfigBuilder`] lets callers swap the model client or identity
//! verifier (tests use doubles); [`ServiceContainer`] holds the built
//! services and registers them as actix application data.

use actix_web::web;
use std::sync::Arc;

use super::factory::ServiceFactory;
use crate::events::EventBus;
use crate::generation::{GenerationAdapter, ModelClient};
use crate::handlers::configure_services;
use crate::identity::{IdentityVerifier, SessionIdentityResolver};
use crate::settings::SuiteSettings;

/// Service configuration builder for dependency injection
#[derive(Clone, Default)]
pub struct ServiceConfigBuilder {
    model_client: Option<Arc<dyn ModelClient>>,
    identity_verifier: Option<Arc<dyn IdentityVerifier>>,
    events: Option<EventBus>,
}

impl ServiceConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom model client instead of the hosted one
    #[must_use]
    pub fn with_model_client(mut self, client: Arc<dyn ModelClient>) -> Self {
        self.model_client = Some(client);
        self
    }

    /// Use a custom identity verifier instead of the HTTP one
    #[must_use]
    pub fn with_identity_verifier(mut self, verifier: Arc<dyn IdentityVerifier>) -> Self {
        self.identity_verifier = Some(verifier);
        self
    }

    /// Share an existing event bus instead of creating one
    #[must_use]
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the service container
    ///
    /// # Errors
    ///
    /// Returns an error if a production collaborator has to be created and
    /// its configuration is invalid
    pub fn build(self, settings: SuiteSettings) -> anyhow::Result<ServiceContainer> {
        log::info!("🏭 Starting service factory...");

        let events = self.events.unwrap_or_default();

        let model_client = match self.model_client {
            Some(client) => {
                log::info!("✅ Custom generation model client configured via dependency injection");
                client
            }
            None => ServiceFactory::create_model_client(&settings.generation)?,
        };
        let verifier = match self.identity_verifier {
            Some(verifier) => {
                log::info!("✅ Custom identity verifier configured via dependency injection");
                verifier
            }
            None => ServiceFactory::create_identity_verifier(&settings.identity)?,
        };

        let adapter = ServiceFactory::create_generation_adapter(
            &settings.generation,
            model_client,
            events.clone(),
        );
        let resolver =
            ServiceFactory::create_session_resolver(&settings.identity, verifier, events.clone());

        log::info!("🏭 Service factory completed successfully");
        Ok(ServiceContainer {
            settings,
            events,
            adapter,
            resolver,
        })
    }
}

/// Application service container for centralized dependency management
#[derive(Clone)]
pub struct ServiceContainer {
    settings: SuiteSettings,
    events: EventBus,
    adapter: GenerationAdapter,
    resolver: SessionIdentityResolver,
}

impl ServiceContainer {
    #[must_use]
    pub const fn settings(&self) -> &SuiteSettings {
        &self.settings
    }

    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    #[must_use]
    pub const fn adapter(&self) -> &GenerationAdapter {
        &self.adapter
    }

    #[must_use]
    pub const fn resolver(&self) -> &SessionIdentityResolver {
        &self.resolver
    }

    /// Register the services as application data and mount every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.settings.clone()))
            .app_data(web::Data::new(self.events.clone()))
            .app_data(web::Data::new(self.adapter.clone()))
            .app_data(web::Data::new(self.resolver.clone()));
        configure_services(cfg);
    }
}
