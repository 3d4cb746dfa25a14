//! Resolve the caller's identity from the session cookie
//!
//! Resolution fails closed: anything other than a positive verification from
//! the trusted service yields no identity.

use actix_web::HttpRequest;
use std::sync::Arc;

use super::verifier::IdentityVerifier;
use crate::events::{EventBus, EventKind};
use crate::models::{IdentityResolution, SessionCredential, UserIdentity};
use crate::utils::cookie_utils::{extract_cookie_value, SESSION_COOKIE_NAME};
use crate::utils::logging::LoggingHelper;

/// Revocation is always checked; a signed but revoked cookie must not resolve.
const CHECK_REVOKED: bool = true;

#[derive(Clone)]
pub struct SessionIdentityResolver {
    verifier: Arc<dyn IdentityVerifier>,
    cookie_name: String,
    events: EventBus,
}

impl SessionIdentityResolver {
    #[must_use]
    pub fn new(verifier: Arc<dyn IdentityVerifier>, events: EventBus) -> Self {
        Self {
            verifier,
            cookie_name: SESSION_COOKIE_NAME.to_string(),
            events,
        }
    }

    #[must_use]
    pub fn with_cookie_name(mut self, cookie_name: impl Into<String>) -> Self {
        self.cookie_name = cookie_name.into();
        self
    }

    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Read the session credential from the request, if any
    #[must_use]
    pub fn extract_credential(&self, req: &HttpRequest) -> Option<SessionCredential> {
        extract_cookie_value(req, &self.cookie_name).and_then(SessionCredential::new)
    }

    /// Resolve the request's session cookie to an identity
    pub async fn resolve(&self, req: &HttpRequest) -> IdentityResolution {
        self.resolve_credential(self.extract_credential(req)).await
    }

    /// Resolve an already-extracted credential
    ///
    /// An absent credential short-circuits without contacting the verifier.
    pub async fn resolve_credential(
        &self,
        credential: Option<SessionCredential>,
    ) -> IdentityResolution {
        let Some(credential) = credential else {
            return IdentityResolution::Anonymous;
        };

        match self
            .verifier
            .verify_session_cookie(credential.as_str(), CHECK_REVOKED)
            .await
        {
            Ok(session) => {
                LoggingHelper::log_identity_verified(&session.uid);
                IdentityResolution::Authenticated(UserIdentity::new(session.uid))
            }
            Err(error) => {
                let reason = error.to_string();
                LoggingHelper::log_identity_failure(credential.as_str(), &reason);
                self.events.publish(EventKind::IdentityVerificationFailed {
                    reason: reason.clone(),
                });
                IdentityResolution::VerificationFailed(reason)
            }
        }
    }

    /// The verified user behind the request, or `None`
    ///
    /// Never fails; verification problems are logged and reported on the
    /// event bus instead.
    pub async fn resolve_current_user_id(&self, req: &HttpRequest) -> Option<UserIdentity> {
        self.resolve(req).await.into_identity()
    }
}
