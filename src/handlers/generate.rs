//! Generation endpoints
//!
//! Each handler validates its body into a [`GenerationRequest`], calls the
//! adapter once, and maps the outcome to a JSON response. Invalid bodies never
//! reach the adapter.

use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::generation::GenerationAdapter;
use crate::models::GenerationRequest;
use crate::settings::SuiteSettings;
use crate::utils::logging::LoggingHelper;
use crate::utils::responses::ResponseBuilder;
use crate::validation::{parse_json_body, GenerationValidator, ValidationError};

/// Parse and validate a body, or produce the 400 response
fn validate_body<T>(
    route: &str,
    body: &[u8],
    validate: fn(&Value) -> Result<T, ValidationError>,
) -> Result<T, HttpResponse> {
    validate(&parse_json_body(body)).map_err(|error| {
        let message = error.to_string();
        LoggingHelper::log_validation_rejected(route, &message);
        ResponseBuilder::required_field(&message)
    })
}

async fn dispatch(
    request: Result<GenerationRequest, HttpResponse>,
    adapter: &GenerationAdapter,
    settings: &SuiteSettings,
) -> HttpResponse {
    let request = match request {
        Ok(request) => request,
        Err(response) => return response,
    };
    log::debug!("Dispatching {} generation request", request.variant());

    match adapter.generate(&request).await {
        Ok(result) => ResponseBuilder::ok().json(&result),
        Err(error) => ResponseBuilder::generation_failed(&error, settings.generation.error_mapping),
    }
}

/// `POST /generate-flowchart` with `{ "description": ... }`
pub async fn generate_flowchart(
    body: web::Bytes,
    adapter: web::Data<GenerationAdapter>,
    settings: web::Data<SuiteSettings>,
) -> HttpResponse {
    let request = validate_body("generate-flowchart", &body, GenerationValidator::flowchart)
        .map(GenerationRequest::Flowchart);
    dispatch(request, &adapter, &settings).await
}

/// `POST /generate-image` with `{ "prompt": ... }`
pub async fn generate_image(
    body: web::Bytes,
    adapter: web::Data<GenerationAdapter>,
    settings: web::Data<SuiteSettings>,
) -> HttpResponse {
    let request = validate_body("generate-image", &body, GenerationValidator::image)
        .map(GenerationRequest::Image);
    dispatch(request, &adapter, &settings).await
}

/// `POST /api/genkit/search` with `{ "query": ..., "dataSources": [...] }`
pub async fn search(
    body: web::Bytes,
    adapter: web::Data<GenerationAdapter>,
    settings: web::Data<SuiteSettings>,
) -> HttpResponse {
    let request = validate_body("genkit/search", &body, GenerationValidator::search)
        .map(GenerationRequest::Search);
    dispatch(request, &adapter, &settings).await
}

/// `POST /api/genkit/form` with `{ "description": ... }`
pub async fn generate_form(
    body: web::Bytes,
    adapter: web::Data<GenerationAdapter>,
    settings: web::Data<SuiteSettings>,
) -> HttpResponse {
    let request = validate_body("genkit/form", &body, GenerationValidator::form)
        .map(GenerationRequest::Form);
    dispatch(request, &adapter, &settings).await
}

/// `POST /api/genkit/summary` with `{ "topic": ... }`
pub async fn generate_summary(
    body: web::Bytes,
    adapter: web::Data<GenerationAdapter>,
    settings: web::Data<SuiteSettings>,
) -> HttpResponse {
    let request = validate_body("genkit/summary", &body, GenerationValidator::summary)
        .map(GenerationRequest::Summary);
    dispatch(request, &adapter, &settings).await
}
