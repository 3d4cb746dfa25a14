//! Custom assertion helpers for response testing

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;

/// Assert the status code and return the JSON body
///
/// # Panics
///
/// Panics if the status differs or the body is not JSON.
pub async fn assert_json_response<B>(response: ServiceResponse<B>, expected_status: u16) -> Value
where
    B: MessageBody,
{
    assert_eq!(
        response.status().as_u16(),
        expected_status,
        "Expected status {expected_status}, got {}",
        response.status()
    );
    let body = test::read_body(response).await;
    serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "Expected a JSON body, got {:?}: {e}",
            String::from_utf8_lossy(&body)
        )
    })
}

/// Assert an `{ "error": message }` body with the given status
///
/// # Panics
///
/// Panics if the status or the body differ.
pub async fn assert_error_response<B>(
    response: ServiceResponse<B>,
    expected_status: u16,
    expected_message: &str,
) where
    B: MessageBody,
{
    let body = assert_json_response(response, expected_status).await;
    assert_eq!(
        body,
        serde_json::json!({ "error": expected_message }),
        "Unexpected error body"
    );
}

/// Assert an error body whose message is non-empty
///
/// # Panics
///
/// Panics if the status differs or `error` is missing or blank.
pub async fn assert_error_status<B>(response: ServiceResponse<B>, expected_status: u16) -> String
where
    B: MessageBody,
{
    let body = assert_json_response(response, expected_status).await;
    let message = body["error"]
        .as_str()
        .unwrap_or_else(|| panic!("Expected an 'error' string, got {body}"))
        .to_string();
    assert!(!message.trim().is_empty(), "Error message should not be blank");
    message
}
