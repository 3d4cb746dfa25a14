//! REST client for the hosted Gemini `generateContent` endpoint

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use super::client::{ModelClient, ModelConfig, ModelResponse};
use super::errors::ModelError;
use crate::settings::GenerationSettings;

/// Model client that calls the Gemini HTTP API directly
#[derive(Clone)]
pub struct GeminiModelClient {
    client: Client,
    base_url: Url,
    api_version: String,
    model: String,
    api_key: String,
}

impl GeminiModelClient {
    /// Create a client for `model` against `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] if the base URL cannot be parsed
    pub fn new(
        base_url: &str,
        api_version: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ModelError::Configuration(format!("invalid base url '{base_url}': {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            api_version: api_version.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from the generation settings
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] if the configured base URL is invalid
    pub fn from_settings(settings: &GenerationSettings) -> Result<Self, ModelError> {
        Self::new(
            &settings.base_url,
            settings.api_version.as_str(),
            settings.model.as_str(),
            settings.api_key.as_str(),
        )
    }

    /// Full `generateContent` URL for the configured model
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] if the path cannot be joined
    pub fn endpoint(&self) -> Result<Url, ModelError> {
        let version = self.api_version.trim_matches('/');
        let mut url = self
            .base_url
            .join(&format!("{version}/models/{}:generateContent", self.model))
            .map_err(|e| ModelError::Configuration(format!("endpoint build failed: {e}")))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl ModelClient for GeminiModelClient {
    async fn generate(
        &self,
        prompt: &str,
        config: &ModelConfig,
    ) -> Result<ModelResponse, ModelError> {
        let request = GenerateContentRequest::new(prompt, config);

        let response = self
            .client
            .post(self.endpoint()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ModelError::Transport(e.without_url().to_string()))?;

        decode_response(&body).map(ModelResponse::new)
    }
}

/// Decode a 2xx `generateContent` body into the candidate text
fn decode_response(body: &str) -> Result<String, ModelError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;
    extract_text(parsed)
}

fn map_http_error(status: StatusCode, body: &str) -> ModelError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    ModelError::Http {
        status: status.as_u16(),
        message,
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, ModelError> {
    let text: String = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(ModelError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str, config: &ModelConfig) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: config.temperature,
                response_mime_type: "application/json",
            },
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_includes_model_and_key() {
        let client = GeminiModelClient::new(
            "https://generativelanguage.googleapis.com",
            "v1beta",
            "gemini-2.5-flash",
            "test-key",
        )
        .unwrap();

        let endpoint = client.endpoint().unwrap();
        assert_eq!(
            endpoint.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key=test-key"
        );
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let result = GeminiModelClient::new("not a url", "v1beta", "m", "k");
        assert!(matches!(result, Err(ModelError::Configuration(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let config = ModelConfig { temperature: 0.3 };
        let body = serde_json::to_value(GenerateContentRequest::new("find invoices", &config)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "find invoices");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"nodes\":" }, { "text": "[]}" }] }
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "{\"nodes\":[]}");
    }

    #[test]
    fn test_extract_text_without_candidates_is_empty_response() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert_eq!(extract_text(response), Err(ModelError::EmptyResponse));

        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(extract_text(response), Err(ModelError::EmptyResponse));
    }

    #[test]
    fn test_undecodable_success_body_is_invalid_response() {
        for body in ["<html>maintenance</html>", "", r#"{"candidates":"none"}"#] {
            let error = decode_response(body).unwrap_err();
            assert!(matches!(error, ModelError::InvalidResponse(_)), "{body:?}");
            assert!(!error.is_transient());
        }

        assert_eq!(
            decode_response(r#"{"candidates":[{"content":{"parts":[{"text":"{}"}]}}]}"#),
            Ok("{}".to_string())
        );
    }

    #[test]
    fn test_http_error_prefers_service_message() {
        let error = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#,
        );
        assert_eq!(
            error,
            ModelError::Http {
                status: 429,
                message: "Resource has been exhausted".to_string()
            }
        );

        let error = map_http_error(StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>");
        assert_eq!(
            error,
            ModelError::Http {
                status: 503,
                message: "Service Unavailable".to_string()
            }
        );
    }
}
