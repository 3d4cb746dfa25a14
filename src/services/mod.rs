//! Application service wiring
//!
//! - [`factory`] - creates the production collaborators from settings
//! - [`dependency_injection`] - builder with overridable collaborators and the
//!   container handed to the HTTP server

pub mod dependency_injection;
pub mod factory;

pub use dependency_injection::{ServiceConfigBuilder, ServiceContainer};
pub use factory::ServiceFactory;
