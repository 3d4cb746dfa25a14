use serde::{Deserialize, Serialize};

pub mod generation;
pub mod identity;

pub use generation::{
    FlowchartRequest, FormRequest, GenerationRequest, GenerationResult, GenerationVariant,
    ImageRequest, SearchRequest, SummaryRequest,
};
pub use identity::{IdentityResolution, SessionCredential, UserIdentity};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Body returned by `GET /api/session`
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl From<&IdentityResolution> for SessionStatusResponse {
    fn from(resolution: &IdentityResolution) -> Self {
        Self {
            authenticated: resolution.is_authenticated(),
            uid: resolution.user_id().map(ToString::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_status_from_resolution() {
        let authenticated =
            SessionStatusResponse::from(&IdentityResolution::Authenticated(UserIdentity::new("abc123")));
        assert_eq!(
            authenticated,
            SessionStatusResponse {
                authenticated: true,
                uid: Some("abc123".to_string())
            }
        );

        for resolution in [
            IdentityResolution::Anonymous,
            IdentityResolution::VerificationFailed("revoked".to_string()),
        ] {
            let status = SessionStatusResponse::from(&resolution);
            assert!(!status.authenticated);
            assert_eq!(serde_json::to_value(&status).unwrap(), serde_json::json!({ "authenticated": false }));
        }
    }
}
