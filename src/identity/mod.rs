//! Session identity resolution
//!
//! The session cookie is an opaque signed token. It is only ever trusted after
//! the [`IdentityVerifier`] confirms it, with revocation checking enabled.

pub mod errors;
pub mod resolver;
pub mod verifier;

pub use errors::IdentityVerificationError;
pub use resolver::SessionIdentityResolver;
pub use verifier::{HttpIdentityVerifier, IdentityVerifier, VerifiedSession};
