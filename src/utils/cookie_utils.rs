use actix_web::HttpRequest;

/// Default name of the cookie carrying the session credential
pub const SESSION_COOKIE_NAME: &str = "session";

/// Extract a cookie value from the request, treating an empty value as absent
#[must_use]
pub fn extract_cookie_value(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    req.cookie(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Log the names of cookies present on a request (values are never logged)
pub fn log_cookie_names(req: &HttpRequest) {
    if let Ok(cookies) = req.cookies() {
        let names: Vec<&str> = cookies.iter().map(actix_web::cookie::Cookie::name).collect();
        log::debug!("Request cookies: {names:?}");
    }
}
