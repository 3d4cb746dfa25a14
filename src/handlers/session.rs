use actix_web::{web, HttpRequest, HttpResponse};

use crate::identity::SessionIdentityResolver;
use crate::models::SessionStatusResponse;
use crate::utils::cookie_utils::log_cookie_names;
use crate::utils::responses::ResponseBuilder;

/// `GET /api/session` - report whether the caller's session cookie verifies
///
/// Always 200; an invalid session looks the same as no session.
pub async fn session_status(
    req: HttpRequest,
    resolver: web::Data<SessionIdentityResolver>,
) -> HttpResponse {
    log_cookie_names(&req);
    let resolution = resolver.resolve(&req).await;
    ResponseBuilder::ok()
        .with_header("Cache-Control", "no-store")
        .json(&SessionStatusResponse::from(&resolution))
}
