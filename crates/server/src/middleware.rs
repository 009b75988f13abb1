use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use service::auth::errors::AuthError;

use crate::errors::ApiError;
use crate::state::ServerState;

pub const TOKEN_HEADER: &str = "x-auth-token";
pub const TOKEN_COOKIE: &str = "auth_token";

/// Routes reachable without a token.
pub fn is_public(method: &Method, path: &str) -> bool {
    if method == Method::OPTIONS {
        return true;
    }
    match path {
        "/health" | "/metrics" | "/api-docs/openapi.json" => true,
        "/auth/register" | "/auth/login" | "/auth/logout" => method == Method::POST,
        "/services" | "/categories" => method == Method::GET,
        p => method == Method::GET && (p.starts_with("/services/") || p.starts_with("/reviews/")),
    }
}

/// Token from `x-auth-token`, then `Authorization: Bearer`, then the cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let from_header = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(t) = from_header {
        return Some(t.to_string());
    }
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(t) = bearer {
        return Some(t.to_string());
    }
    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

/// Global middleware: verifies the token on every non-public route and puts
/// the caller's `Identity` into request extensions.
pub async fn require_auth(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    if is_public(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let Some(token) = extract_token(req.headers()) else {
        debug!(path = %req.uri().path(), "missing token");
        return Err(AuthError::Unauthenticated.into());
    };
    let identity = state.auth_service().verify_token(&token)?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
