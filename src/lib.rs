#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the suitegate application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod events;
pub mod generation;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod services;
pub mod settings;
pub mod utils;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use events::EventBus;
pub use generation::{GenerationAdapter, GenerationError};
pub use handlers::configure_services;
pub use identity::SessionIdentityResolver;
pub use models::{IdentityResolution, UserIdentity};
pub use services::{ServiceContainer, ServiceFactory};
pub use settings::SuiteSettings;
