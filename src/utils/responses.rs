//! HTTP response handling system
//!
//! Every error body produced by the generation and session endpoints has the
//! shape `{ "error": "<message>" }`. The builders here keep that shape in one
//! place and map generation failures to status codes according to the
//! configured [`ErrorMapping`].

use actix_web::{http::header, http::StatusCode, HttpResponse};
use serde_json::json;

use crate::generation::GenerationError;
use crate::settings::ErrorMapping;

/// Message used when a failure carries no usable text
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred.";

// ===============================
// CACHED RESPONSES FOR PERFORMANCE
// ===============================

static CACHED_RESPONSES: std::sync::LazyLock<CachedResponses> =
    std::sync::LazyLock::new(CachedResponses::new);

/// Pre-serialized bodies for responses that never vary
struct CachedResponses {
    unexpected_error: String,
    invalid_request: String,
}

impl CachedResponses {
    fn new() -> Self {
        Self {
            unexpected_error: Self::create_json(FALLBACK_ERROR_MESSAGE),
            invalid_request: Self::create_json("The request is malformed or invalid."),
        }
    }

    fn create_json(message: &str) -> String {
        json!({ "error": message }).to_string()
    }

    fn unexpected_error(&self) -> HttpResponse {
        HttpResponse::InternalServerError()
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .body(self.unexpected_error.clone())
    }

    fn invalid_request(&self) -> HttpResponse {
        HttpResponse::BadRequest()
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .body(self.invalid_request.clone())
    }
}

/// Unified response builder for the JSON endpoints
pub struct ResponseBuilder;

impl ResponseBuilder {
    // ===============================
    // ERROR RESPONSE METHODS
    // ===============================

    /// Create a `BadRequest` (400) error response
    #[must_use]
    pub fn bad_request() -> ErrorResponseBuilder {
        ErrorResponseBuilder::new(StatusCode::BAD_REQUEST)
    }

    /// Create an `InternalServerError` (500) error response
    #[must_use]
    pub fn internal_server_error() -> ErrorResponseBuilder {
        ErrorResponseBuilder::new(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Create a `BadGateway` (502) error response
    #[must_use]
    pub fn bad_gateway() -> ErrorResponseBuilder {
        ErrorResponseBuilder::new(StatusCode::BAD_GATEWAY)
    }

    /// Create an `UnprocessableEntity` (422) error response
    #[must_use]
    pub fn unprocessable_entity() -> ErrorResponseBuilder {
        ErrorResponseBuilder::new(StatusCode::UNPROCESSABLE_ENTITY)
    }

    // ===============================
    // SUCCESS RESPONSE METHODS
    // ===============================

    /// Create an OK response (200) with JSON content
    #[must_use]
    pub fn ok() -> JsonResponseBuilder {
        JsonResponseBuilder::new(StatusCode::OK)
    }

    // ===============================
    // CONVENIENCE METHODS
    // ===============================

    /// Validation failure naming the missing field(s)
    #[must_use]
    pub fn required_field(message: &str) -> HttpResponse {
        Self::bad_request().with_message(message).build()
    }

    /// Map an adapter failure to an error response
    ///
    /// In `Coarse` mode every failure is a 500. In `Refined` mode upstream
    /// failures are 502 and unusable model output is 422.
    #[must_use]
    pub fn generation_failed(error: &GenerationError, mapping: ErrorMapping) -> HttpResponse {
        let builder = match (mapping, error) {
            (ErrorMapping::Coarse, _) => Self::internal_server_error(),
            (ErrorMapping::Refined, GenerationError::Service(_)) => Self::bad_gateway(),
            (ErrorMapping::Refined, GenerationError::MalformedOutput(_)) => {
                Self::unprocessable_entity()
            }
        };
        builder.with_message(&error.to_string()).build()
    }
}

// ===============================
// BUILDER TYPES
// ===============================

/// Builder for `{ "error": ... }` responses
pub struct ErrorResponseBuilder {
    status: StatusCode,
    message: Option<String>,
}

impl ErrorResponseBuilder {
    fn new(status: StatusCode) -> Self {
        Self {
            status,
            message: None,
        }
    }

    /// Set the error message. Blank messages fall back to the default text.
    #[must_use]
    pub fn with_message(mut self, message: &str) -> Self {
        if !message.trim().is_empty() {
            self.message = Some(message.to_string());
        }
        self
    }

    /// Build the final `HttpResponse`
    #[must_use]
    pub fn build(self) -> HttpResponse {
        match (self.status, self.message) {
            (StatusCode::INTERNAL_SERVER_ERROR, None) => CACHED_RESPONSES.unexpected_error(),
            (StatusCode::BAD_REQUEST, None) => CACHED_RESPONSES.invalid_request(),
            (status, message) => HttpResponse::build(status)
                .insert_header((header::CONTENT_TYPE, "application/json"))
                .json(json!({
                    "error": message.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
                })),
        }
    }
}

/// Builder for JSON success responses
pub struct JsonResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
}

impl JsonResponseBuilder {
    fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    /// Add a custom header
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Build the response with JSON content
    #[must_use]
    pub fn json<T: serde::Serialize>(self, data: &T) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status);
        for (name, value) in self.headers {
            builder.insert_header((name, value));
        }
        builder.json(data)
    }
}
