//! Request shapes for the generated document. The handlers deserialize the
//! service crate's input types; these mirror their wire form.

use serde::Deserialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `customer` (default) or `provider`
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct CreateServiceRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub location: String,
    pub image: Option<String>,
}

#[derive(ToSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_id: Uuid,
    /// RFC 3339 timestamp
    pub date: String,
}

#[derive(ToSchema)]
pub struct StatusRequest { pub status: String }

#[derive(ToSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest { pub service_id: Uuid, pub rating: i16, pub comment: String }

#[derive(ToSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest { pub recipient_id: Uuid, pub content: String }

#[derive(ToSchema)]
pub struct CreateCategoryRequest { pub name: String }

#[derive(ToSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDisputeRequest { pub reported_user: Uuid, pub reason: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::auth::logout,
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::services::create,
        crate::routes::bookings::create,
        crate::routes::bookings::list,
        crate::routes::bookings::update_status,
        crate::routes::bookings::pay,
        crate::routes::reviews::list,
        crate::routes::reviews::create,
        crate::routes::messages::send,
        crate::routes::messages::conversations,
        crate::routes::messages::thread,
        crate::routes::users::directory,
        crate::routes::admin::stats,
        crate::routes::admin::list_users,
        crate::routes::admin::get_user,
        crate::routes::admin::toggle_verify,
        crate::routes::admin::delete_user,
        crate::routes::categories::list,
        crate::routes::categories::create,
        crate::routes::categories::delete,
        crate::routes::disputes::create,
        crate::routes::disputes::list,
        crate::routes::disputes::set_status,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            CreateServiceRequest,
            CreateBookingRequest,
            StatusRequest,
            CreateReviewRequest,
            SendMessageRequest,
            CreateCategoryRequest,
            CreateDisputeRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "services"),
        (name = "bookings"),
        (name = "reviews"),
        (name = "messages"),
        (name = "users"),
        (name = "admin"),
        (name = "categories"),
        (name = "disputes")
    )
)]
pub struct ApiDoc;
