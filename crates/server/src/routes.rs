use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, patch, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::middleware::require_auth;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod categories;
pub mod disputes;
pub mod messages;
pub mod reviews;
pub mod services;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> impl IntoResponse {
    common::metrics::encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router. Every route sits behind
/// `require_auth`, which lets the public ones through.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout));

    let marketplace = Router::new()
        .route("/services", get(services::list).post(services::create))
        .route("/services/:id", get(services::get))
        .route("/bookings", get(bookings::list).post(bookings::create))
        .route("/bookings/:id/status", patch(bookings::update_status))
        .route("/bookings/:id/pay", patch(bookings::pay))
        .route("/reviews", post(reviews::create))
        .route("/reviews/:service_id", get(reviews::list));

    let social = Router::new()
        .route("/messages", post(messages::send))
        .route("/messages/conversations", get(messages::conversations))
        .route("/messages/:user_id", get(messages::thread))
        .route("/users", get(users::directory))
        .route("/disputes", get(disputes::list).post(disputes::create))
        .route("/disputes/:id/status", put(disputes::set_status));

    let admin_routes = Router::new()
        .route("/admin/stats", get(admin::stats))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:id", get(admin::get_user).delete(admin::delete_user))
        .route("/admin/users/:id/verify", put(admin::toggle_verify))
        .route("/categories", get(categories::list).post(categories::create))
        .route("/categories/:id", axum::routing::delete(categories::delete));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(auth_routes)
        .merge(marketplace)
        .merge(social)
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
