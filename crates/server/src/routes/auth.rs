use axum::{extract::State, http::StatusCode, Extension, Json};
use axum::extract::rejection::JsonRejection;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use service::auth::domain::{AuthSession, LoginInput, RegisterInput, User};
use service::policy::Identity;

use crate::errors::ApiError;
use crate::extract::extract_json;
use crate::middleware::TOKEN_COOKIE;
use crate::state::ServerState;

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered, returns token and user"), (status = 400, description = "Bad Request"), (status = 409, description = "Email already registered")))]
pub async fn register(
    State(state): State<ServerState>,
    jar: CookieJar,
    body: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthSession>), ApiError> {
    let input = extract_json(body)?;
    let session = state.auth_service().register(input).await?;
    Ok((jar.add(session_cookie(session.token.clone())), Json(session)))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in, returns token and user"), (status = 401, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    body: Result<Json<LoginInput>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthSession>), ApiError> {
    let input = extract_json(body)?;
    let session = state.auth_service().login(input).await?;
    Ok((jar.add(session_cookie(session.token.clone())), Json(session)))
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", responses((status = 200, description = "Current user"), (status = 401, description = "Unauthenticated"), (status = 404, description = "User deleted")))]
pub async fn me(State(state): State<ServerState>, Extension(who): Extension<Identity>) -> Result<Json<User>, ApiError> {
    Ok(Json(state.auth_service().me(&who).await?))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut expired = session_cookie(String::new());
    expired.make_removal();
    (jar.add(expired), StatusCode::NO_CONTENT)
}
