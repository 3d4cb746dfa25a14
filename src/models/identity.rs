use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::logging::redact_token;

/// Opaque signed session token read from the caller's cookie
///
/// The raw value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential(String);

impl SessionCredential {
    /// Wrap a raw cookie value, rejecting blank values
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionCredential")
            .field(&redact_token(&self.0))
            .finish()
    }
}

/// The resolved principal behind a verified session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
}

impl UserIdentity {
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

/// Outcome of resolving the caller's session cookie
///
/// `Anonymous` and `VerificationFailed` must be treated identically by
/// authorization code; the distinction exists for logging and telemetry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityResolution {
    Authenticated(UserIdentity),
    Anonymous,
    VerificationFailed(String),
}

impl IdentityResolution {
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Authenticated(identity) => Some(identity.uid.as_str()),
            Self::Anonymous | Self::VerificationFailed(_) => None,
        }
    }

    #[must_use]
    pub fn into_identity(self) -> Option<UserIdentity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous | Self::VerificationFailed(_) => None,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}
