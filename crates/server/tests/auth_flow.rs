mod support;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use support::app;

#[tokio::test]
async fn register_login_and_me() -> anyhow::Result<()> {
    let app = app();
    let (token, id) = app.register("Ana", "Ana@Example.com", "customer").await?;
    assert!(!token.is_empty());

    let login = app
        .call(Method::POST, "/auth/login", None, Some(json!({"email": "ana@example.com", "password": "Password1"})))
        .await?;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["role"], "customer");
    assert!(login.body["user"].get("passwordHash").is_none());
    let cookie = login.set_cookie.unwrap_or_default();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));

    let me = app.call(Method::GET, "/auth/me", Some(&token), None).await?;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["id"], id.as_str());
    assert_eq!(me.body["email"], "ana@example.com");
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_conflict() -> anyhow::Result<()> {
    let app = app();
    app.register("Ana", "ana@example.com", "customer").await?;
    let again = app
        .call(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({"name": "Other", "email": "ana@example.com", "password": "Password1"})),
        )
        .await?;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.body["error"]["code"], 1002);
    Ok(())
}

#[tokio::test]
async fn admin_role_cannot_self_register() -> anyhow::Result<()> {
    let app = app();
    let reply = app
        .call(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({"name": "Eve", "email": "eve@example.com", "password": "Password1", "role": "admin"})),
        )
        .await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> anyhow::Result<()> {
    let app = app();
    app.register("Ana", "ana@example.com", "customer").await?;
    let reply = app
        .call(Method::POST, "/auth/login", None, Some(json!({"email": "ana@example.com", "password": "nope-nope"})))
        .await?;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"]["code"], 1004);
    Ok(())
}

#[tokio::test]
async fn missing_and_invalid_tokens() -> anyhow::Result<()> {
    let app = app();
    let missing = app.call(Method::GET, "/bookings", None, None).await?;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"]["code"], 1005);

    let invalid = app.call(Method::GET, "/bookings", Some("not-a-jwt"), None).await?;
    assert_eq!(invalid.status, StatusCode::UNAUTHORIZED);
    assert_eq!(invalid.body["error"]["code"], 1006);
    Ok(())
}

#[tokio::test]
async fn token_accepted_from_header_and_cookie() -> anyhow::Result<()> {
    let app = app();
    let (token, _) = app.register("Ana", "ana@example.com", "customer").await?;

    let req = Request::builder().uri("/auth/me").header("x-auth-token", token.as_str()).body(Body::empty())?;
    assert_eq!(app.send(req).await?.status, StatusCode::OK);

    let req = Request::builder()
        .uri("/auth/me")
        .header(header::COOKIE, format!("auth_token={token}"))
        .body(Body::empty())?;
    assert_eq!(app.send(req).await?.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn logout_clears_cookie() -> anyhow::Result<()> {
    let app = app();
    let reply = app.call(Method::POST, "/auth/logout", None, None).await?;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    let cookie = reply.set_cookie.unwrap_or_default();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("Max-Age=0"));
    Ok(())
}

#[tokio::test]
async fn public_endpoints_need_no_token() -> anyhow::Result<()> {
    let app = app();
    let health = app.call(Method::GET, "/health", None, None).await?;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let doc = app.call(Method::GET, "/api-docs/openapi.json", None, None).await?;
    assert_eq!(doc.status, StatusCode::OK);
    assert!(doc.body["paths"].get("/bookings/{id}/status").is_some());

    let metrics = app.router.clone();
    let req = Request::builder().uri("/metrics").body(Body::empty())?;
    let resp = tower::ServiceExt::oneshot(metrics, req).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(app.call(Method::GET, "/services", None, None).await?.status, StatusCode::OK);
    assert_eq!(app.call(Method::GET, "/categories", None, None).await?.status, StatusCode::OK);
    Ok(())
}
