//! Helper functions for middleware

use actix_web::http::header::{AUTHORIZATION, HeaderMap};

/// Routes reachable without a token
const PUBLIC_ROUTES: &[&str] = &["/health", "/auth/login", "/auth/register"];

/// Extract the token from an `Authorization: Bearer ...` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Check if a route is public (doesn't require authentication)
pub fn is_public_route(path: &str) -> bool {
    let path = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);
    PUBLIC_ROUTES.contains(&path)
}
