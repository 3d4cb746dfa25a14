// Handler tests against a full app built from the service container
use actix_web::{http::Method, test, App};
use serde_json::json;
use std::sync::Arc;

use crate::generation::ModelError;
use crate::identity::IdentityVerificationError;
use crate::testing::constants::{TEST_SESSION_TOKEN, TEST_UID};
use crate::testing::mock::{MockIdentityVerifier, MockModelClient};
use crate::testing::{
    assert_error_response, assert_error_status, assert_json_response, RequestBuilder,
    TestFixtures,
};

#[actix_web::test]
async fn test_ping() {
    let container = TestFixtures::container_returning("{}");
    let app = test::init_service(App::new().configure(|cfg| container.configure(cfg))).await;

    let request = RequestBuilder::new()
        .uri("/ping")
        .to_test_request()
        .to_request();
    let response = test::call_service(&app, request).await;
    let body = assert_json_response(response, 200).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_flowchart_success_returns_model_object() {
    let model = Arc::new(MockModelClient::returning(r#"{"nodes":["Start","Signup","End"]}"#));
    let container =
        TestFixtures::container_with(model.clone(), Arc::new(MockIdentityVerifier::accepting(TEST_UID)));
    let app = test::init_service(App::new().configure(|cfg| container.configure(cfg))).await;

    let request = RequestBuilder::post_json(
        "/generate-flowchart",
        &json!({ "description": "user signup flow" }),
    )
    .to_test_request()
    .to_request();
    let response = test::call_service(&app, request).await;

    let body = assert_json_response(response, 200).await;
    assert_eq!(body, json!({ "nodes": ["Start", "Signup", "End"] }));
    assert_eq!(model.call_count(), 1);
    assert!(model.last_prompt().unwrap().contains("user signup flow"));
}

#[actix_web::test]
async fn test_non_json_body_is_missing_field() {
    let model = Arc::new(MockModelClient::returning("{}"));
    let container =
        TestFixtures::container_with(model.clone(), Arc::new(MockIdentityVerifier::accepting(TEST_UID)));
    let app = test::init_service(App::new().configure(|cfg| container.configure(cfg))).await;

    let request = RequestBuilder::new()
        .method(Method::POST)
        .uri("/api/generate-image")
        .header("Content-Type", "text/plain")
        .raw_body("a sunset")
        .to_test_request()
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_error_response(response, 400, "Prompt is required.").await;
    assert_eq!(model.call_count(), 0);
}

#[actix_web::test]
async fn test_model_failure_is_500_with_message() {
    let model = Arc::new(MockModelClient::failing(ModelError::Http {
        status: 429,
        message: "quota exceeded".to_string(),
    }));
    let container =
        TestFixtures::container_with(model, Arc::new(MockIdentityVerifier::accepting(TEST_UID)));
    let app = test::init_service(App::new().configure(|cfg| container.configure(cfg))).await;

    let request = RequestBuilder::post_json("/api/genkit/summary", &json!({ "topic": "Q3" }))
        .to_test_request()
        .to_request();
    let response = test::call_service(&app, request).await;

    let message = assert_error_status(response, 500).await;
    assert!(message.contains("quota exceeded"));
}

#[actix_web::test]
async fn test_other_methods_on_generation_routes_are_not_allowed() {
    let model = Arc::new(MockModelClient::returning("{}"));
    let container =
        TestFixtures::container_with(model.clone(), Arc::new(MockIdentityVerifier::accepting(TEST_UID)));
    let app = test::init_service(App::new().configure(|cfg| container.configure(cfg))).await;

    let routes = [
        "/generate-flowchart",
        "/api/generate-flowchart",
        "/generate-image",
        "/api/generate-image",
        "/api/genkit/search",
        "/api/genkit/form",
        "/api/genkit/summary",
    ];
    for uri in routes {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let request = RequestBuilder::new()
                .method(method.clone())
                .uri(uri)
                .to_test_request()
                .to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status().as_u16(), 405, "{method} {uri}");
        }
    }
    assert_eq!(model.call_count(), 0);
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let container = TestFixtures::container_returning("{}");
    let app = test::init_service(App::new().configure(|cfg| container.configure(cfg))).await;

    let request = RequestBuilder::post_json("/api/genkit/unknown", &json!({}))
        .to_test_request()
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_session_status_reports_uid() {
    let container = TestFixtures::container_returning("{}");
    let app = test::init_service(App::new().configure(|cfg| container.configure(cfg))).await;

    let request = RequestBuilder::new()
        .uri("/api/session")
        .with_session_cookie(TEST_SESSION_TOKEN)
        .to_test_request()
        .to_request();
    let response = test::call_service(&app, request).await;
    let body = assert_json_response(response, 200).await;
    assert_eq!(body, json!({ "authenticated": true, "uid": TEST_UID }));
}

#[actix_web::test]
async fn test_session_status_hides_verification_failure() {
    let verifier = Arc::new(MockIdentityVerifier::rejecting(
        IdentityVerificationError::Expired,
    ));
    let container =
        TestFixtures::container_with(Arc::new(MockModelClient::returning("{}")), verifier.clone());
    let app = test::init_service(App::new().configure(|cfg| container.configure(cfg))).await;

    let request = RequestBuilder::new()
        .uri("/api/session")
        .with_session_cookie(TEST_SESSION_TOKEN)
        .to_test_request()
        .to_request();
    let response = test::call_service(&app, request).await;
    let body = assert_json_response(response, 200).await;
    assert_eq!(body, json!({ "authenticated": false }));
    assert_eq!(verifier.call_count(), 1);
}
