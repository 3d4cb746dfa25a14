//! HTTP request builders for testing handlers

use actix_web::cookie::Cookie;
use actix_web::http::Method;
use actix_web::test;
use serde_json::Value;

use super::constants::TEST_USER_AGENT;
use crate::utils::cookie_utils::SESSION_COOKIE_NAME;

/// Builder for creating HTTP requests for testing
pub struct RequestBuilder {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    cookies: Vec<Cookie<'static>>,
    body: Option<Vec<u8>>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            method: Method::GET,
            uri: "/".to_string(),
            headers: Vec::new(),
            cookies: Vec::new(),
            body: None,
        }
    }

    /// `POST uri` with a JSON body
    #[must_use]
    pub fn post_json(uri: &str, body: &Value) -> Self {
        Self::new()
            .method(Method::POST)
            .uri(uri)
            .header("Content-Type", "application/json")
            .raw_body(body.to_string())
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn uri(mut self, uri: &str) -> Self {
        self.uri = uri.to_string();
        self
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Set common API headers
    #[must_use]
    pub fn api_headers(self) -> Self {
        self.header("User-Agent", TEST_USER_AGENT)
            .header("Accept", "application/json")
    }

    /// Use `body` verbatim, whether or not it is JSON
    #[must_use]
    pub fn raw_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Add the session cookie carrying `token`
    #[must_use]
    pub fn with_session_cookie(self, token: &str) -> Self {
        self.with_cookie(Cookie::new(SESSION_COOKIE_NAME, token.to_string()))
    }

    /// Build a `TestRequest` ready to be sent to a test service
    #[must_use]
    pub fn to_test_request(self) -> test::TestRequest {
        let mut req = test::TestRequest::default()
            .method(self.method)
            .uri(&self.uri);
        for (name, value) in self.headers {
            req = req.insert_header((name, value));
        }
        for cookie in self.cookies {
            req = req.cookie(cookie);
        }
        if let Some(body) = self.body {
            req = req.set_payload(body);
        }
        req
    }

    /// Build a bare `HttpRequest` (body is ignored)
    #[must_use]
    pub fn build(self) -> actix_web::HttpRequest {
        self.to_test_request().to_http_request()
    }
}
