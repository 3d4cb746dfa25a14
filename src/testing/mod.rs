//! Testing utilities for Suitegate
//!
//! Exposed to integration tests through the `testing` feature.
//!
//! - [`fixtures`] - Pre-built settings and service containers
//! - [`mock`] - Model client and identity verifier doubles
//! - [`requests`] - HTTP request builders for handler tests
//! - [`assertions`] - Response assertion helpers
//! - [`logging`] - Global in-memory logger for asserting on log output
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use suitegate::testing::{mock::{MockIdentityVerifier, MockModelClient}, TestFixtures};
//!
//! let model = Arc::new(MockModelClient::returning(r#"{"nodes":[]}"#));
//! let verifier = Arc::new(MockIdentityVerifier::accepting("abc123"));
//! let container = TestFixtures::container_with(model.clone(), verifier);
//! ```

pub mod assertions;
pub mod fixtures;
pub mod logging;
pub mod mock;
pub mod requests;

pub use assertions::*;
pub use fixtures::TestFixtures;
pub use requests::RequestBuilder;

/// Common test constants
pub mod constants {
    /// Uid returned by accepting verifier doubles
    pub const TEST_UID: &str = "abc123";

    /// A syntactically plausible session cookie value
    pub const TEST_SESSION_TOKEN: &str = "eyJhbGciOiJSUzI1NiJ9.eyJzdWIiOiJhYmMxMjMifQ.signature";

    /// Placeholder model API key
    pub const TEST_API_KEY: &str = "test-genai-key";

    /// Verification endpoint that is never contacted in tests
    pub const TEST_VERIFY_URL: &str = "http://127.0.0.1:9/session/verify";

    pub const TEST_USER_AGENT: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
}
