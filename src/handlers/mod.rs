// HTTP request handlers for the AI gateway
pub mod generate;
pub mod health;
pub mod session;

#[cfg(test)]
mod tests;

use actix_web::web;

pub use generate::{generate_flowchart, generate_form, generate_image, generate_summary, search};
pub use health::health;
pub use session::session_status;

/// Mount every route. Application data is registered by the service container.
///
/// Generation endpoints are POST-only resources; other methods get 405.
pub fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg
        // Generation endpoints
        .service(web::resource("/generate-flowchart").route(web::post().to(generate_flowchart)))
        .service(
            web::resource("/api/generate-flowchart").route(web::post().to(generate_flowchart)),
        )
        .service(web::resource("/generate-image").route(web::post().to(generate_image)))
        .service(web::resource("/api/generate-image").route(web::post().to(generate_image)))
        .service(web::resource("/api/genkit/search").route(web::post().to(search)))
        .service(web::resource("/api/genkit/form").route(web::post().to(generate_form)))
        .service(web::resource("/api/genkit/summary").route(web::post().to(generate_summary)))
        // Session endpoint
        .route("/api/session", web::get().to(session_status))
        // Health endpoint
        .route("/ping", web::get().to(health));
}
