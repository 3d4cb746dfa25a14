#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use suitegate::{
    services::{ServiceContainer, ServiceFactory},
    settings::SuiteSettings,
    utils::logging::LoggingHelper,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = SuiteSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e}")))?;
    LoggingHelper::log_settings_summary(&settings);

    let container = ServiceFactory::create_container(settings)
        .map_err(|e| std::io::Error::other(format!("Failed to initialize services: {e:#}")))?;

    let event_logger = container.events().spawn_event_logger();
    let result = start_server(container).await;
    event_logger.abort();
    result
}

/// Start the HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Server binding fails
/// - Server fails to start
async fn start_server(container: ServiceContainer) -> std::io::Result<()> {
    let bind_address = container.settings().get_bind_address();
    print_startup_info(&bind_address, container.settings());

    let cors_origins = container.settings().get_cors_origins();

    HttpServer::new(move || {
        let cors_origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                cors_origins
                    .iter()
                    .any(|allowed| allowed == origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
            .supports_credentials()
            .max_age(3600);

        let container = container.clone();
        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .configure(move |cfg| container.configure(cfg))
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn print_startup_info(bind_address: &str, settings: &SuiteSettings) {
    println!(
        "Starting Suitegate AI gateway v{} on http://{bind_address}",
        suitegate::VERSION
    );
    println!();
    println!("Generation endpoints (model: {}):", settings.generation.model);
    println!("  POST /generate-flowchart  - Flowchart from a process description");
    println!("  POST /generate-image      - Image brief from a prompt");
    println!("  POST /api/genkit/search   - Search filters from a question");
    println!("  POST /api/genkit/form     - Form schema from a description");
    println!("  POST /api/genkit/summary  - Summary for a topic");
    println!("  (flowchart and image are also served under /api/)");
    println!();
    println!("Session endpoints:");
    println!(
        "  GET  /api/session         - Resolve the '{}' cookie",
        settings.identity.cookie_name
    );
    println!();
    println!("System endpoints:");
    println!("  GET  /ping                - Health check");
}
