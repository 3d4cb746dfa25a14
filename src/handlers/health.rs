use actix_web::{HttpResponse, Result};

use crate::models::HealthResponse;

/// Health check endpoint
///
/// # Errors
/// Never fails; the `Result` matches the other handler signatures
pub async fn health() -> Result<HttpResponse> {
    let response = HealthResponse {
        status: "ok".to_string(),
        message: "Suitegate AI gateway is running".to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}
