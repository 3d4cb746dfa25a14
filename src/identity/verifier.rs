//! Session credential verification against a trusted identity service

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use super::errors::IdentityVerificationError;
use crate::settings::IdentitySettings;

/// Claims returned for a verified session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifiedSession {
    pub uid: String,
}

/// A trusted service that can verify session cookies
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `token`, also rejecting revoked sessions when `check_revoked` is set
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityVerificationError`] if the token is malformed,
    /// expired, revoked, or the service cannot answer.
    async fn verify_session_cookie(
        &self,
        token: &str,
        check_revoked: bool,
    ) -> Result<VerifiedSession, IdentityVerificationError>;
}

/// Verifier that delegates to an HTTP verification endpoint
///
/// Sends `{ "sessionCookie": ..., "checkRevoked": ... }` and expects
/// `{ "uid": ... }` on success or `{ "code": ..., "error": ... }` on rejection.
#[derive(Clone)]
pub struct HttpIdentityVerifier {
    client: Client,
    verify_url: Url,
    api_key: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    session_cookie: &'a str,
    check_revoked: bool,
}

#[derive(Deserialize)]
struct VerifyResponse {
    uid: Option<String>,
}

#[derive(Deserialize, Default)]
struct VerifyErrorResponse {
    code: Option<String>,
    error: Option<String>,
}

impl HttpIdentityVerifier {
    /// # Errors
    ///
    /// Returns [`IdentityVerificationError::ServiceUnavailable`] if the URL is invalid
    pub fn new(verify_url: &str, api_key: Option<String>) -> Result<Self, IdentityVerificationError> {
        let verify_url = Url::parse(verify_url).map_err(|e| {
            IdentityVerificationError::ServiceUnavailable(format!(
                "invalid verification url '{verify_url}': {e}"
            ))
        })?;
        Ok(Self {
            client: Client::new(),
            verify_url,
            api_key,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the configured verification URL is invalid
    pub fn from_settings(settings: &IdentitySettings) -> Result<Self, IdentityVerificationError> {
        Self::new(&settings.verify_url, settings.api_key.clone())
    }

    fn interpret(status: StatusCode, body: &str) -> Result<VerifiedSession, IdentityVerificationError> {
        if status.is_success() {
            let parsed: VerifyResponse = serde_json::from_str(body)
                .map_err(|e| IdentityVerificationError::Malformed(e.to_string()))?;
            return match parsed.uid {
                Some(uid) if !uid.is_empty() => Ok(VerifiedSession { uid }),
                _ => Err(IdentityVerificationError::Malformed(
                    "response has no uid".to_string(),
                )),
            };
        }

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let error: VerifyErrorResponse = serde_json::from_str(body).unwrap_or_default();
                Err(IdentityVerificationError::from_service_code(
                    error.code.as_deref(),
                    error.error.as_deref(),
                ))
            }
            other => Err(IdentityVerificationError::ServiceUnavailable(format!(
                "verification service returned {other}"
            ))),
        }
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify_session_cookie(
        &self,
        token: &str,
        check_revoked: bool,
    ) -> Result<VerifiedSession, IdentityVerificationError> {
        let mut request = self.client.post(self.verify_url.clone()).json(&VerifyRequest {
            session_cookie: token,
            check_revoked,
        });
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| IdentityVerificationError::ServiceUnavailable(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| IdentityVerificationError::ServiceUnavailable(e.to_string()))?;

        Self::interpret(status, &body)
    }
}
