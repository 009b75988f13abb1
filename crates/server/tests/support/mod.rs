#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::build_router;
use server::ServerState;
use service::auth::service::AuthConfig;
use service::storage::memory::MemoryStore;

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
}

pub fn app() -> TestApp {
    let auth = AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 12 };
    let state = ServerState::new(Arc::new(MemoryStore::new()), auth);
    let router = build_router(state.clone(), tower_http::cors::CorsLayer::very_permissive());
    TestApp { router, state }
}

pub struct Reply {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub async fn call(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<Reply> {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(v) => req.header(header::CONTENT_TYPE, "application/json").body(Body::from(serde_json::to_vec(&v)?))?,
            None => req.body(Body::empty())?,
        };
        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> anyhow::Result<Reply> {
        let resp = self.router.clone().oneshot(req).await?;
        let status = resp.status();
        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        Ok(Reply { status, set_cookie, body })
    }

    /// Register and return `(token, user id)`.
    pub async fn register(&self, name: &str, email: &str, role: &str) -> anyhow::Result<(String, String)> {
        let reply = self
            .call(
                Method::POST,
                "/auth/register",
                None,
                Some(json!({"name": name, "email": email, "password": "Password1", "role": role})),
            )
            .await?;
        assert_eq!(reply.status, StatusCode::OK, "register {email}: {}", reply.body);
        let token = reply.body["token"].as_str().unwrap_or_default().to_string();
        let id = reply.body["user"]["id"].as_str().unwrap_or_default().to_string();
        Ok((token, id))
    }

    pub async fn admin(&self) -> anyhow::Result<(String, String)> {
        self.state.auth_service().ensure_admin("admin@example.com", "AdminPass1", "Admin").await?;
        let reply = self
            .call(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({"email": "admin@example.com", "password": "AdminPass1"})),
            )
            .await?;
        assert_eq!(reply.status, StatusCode::OK);
        let token = reply.body["token"].as_str().unwrap_or_default().to_string();
        let id = reply.body["user"]["id"].as_str().unwrap_or_default().to_string();
        Ok((token, id))
    }

    /// Publish a listing as `provider_token` and return its id.
    pub async fn listing(&self, provider_token: &str, title: &str, location: &str) -> anyhow::Result<String> {
        let reply = self
            .call(
                Method::POST,
                "/services",
                Some(provider_token),
                Some(json!({
                    "title": title,
                    "description": "Same-day visits",
                    "category": "Home",
                    "price": 80.0,
                    "location": location,
                })),
            )
            .await?;
        assert_eq!(reply.status, StatusCode::CREATED, "create listing: {}", reply.body);
        Ok(reply.body["id"].as_str().unwrap_or_default().to_string())
    }
}
