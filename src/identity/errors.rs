use thiserror::Error;

/// Reasons a session credential could not be turned into an identity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityVerificationError {
    #[error("session cookie has expired")]
    Expired,

    #[error("session cookie has been revoked")]
    Revoked,

    #[error("session cookie rejected: {0}")]
    Rejected(String),

    #[error("verification response malformed: {0}")]
    Malformed(String),

    #[error("identity service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IdentityVerificationError {
    /// Map a verification-service error code onto a typed error
    ///
    /// Codes may carry a namespace prefix such as `auth/`.
    #[must_use]
    pub fn from_service_code(code: Option<&str>, message: Option<&str>) -> Self {
        let code = code.map(|c| c.rsplit('/').next().unwrap_or(c));
        match code {
            Some("session-cookie-expired" | "id-token-expired") => Self::Expired,
            Some("session-cookie-revoked" | "id-token-revoked" | "user-disabled") => Self::Revoked,
            Some(other) => Self::Rejected(message.unwrap_or(other).to_string()),
            None => Self::Rejected(message.unwrap_or("invalid session cookie").to_string()),
        }
    }
}
