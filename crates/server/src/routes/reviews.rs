use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum::extract::rejection::JsonRejection;
use uuid::Uuid;

use service::policy::Identity;
use service::review::{CreateReviewInput, Review, ReviewView};

use crate::errors::ApiError;
use crate::extract::extract_json;
use crate::state::ServerState;

#[utoipa::path(get, path = "/reviews/{service_id}", tag = "reviews", params(("service_id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "Reviews with author")))]
pub async fn list(State(state): State<ServerState>, Path(service_id): Path<Uuid>) -> Result<Json<Vec<ReviewView>>, ApiError> {
    Ok(Json(state.reviews().for_listing(service_id).await?))
}

#[utoipa::path(post, path = "/reviews", tag = "reviews", request_body = crate::openapi::CreateReviewRequest, responses((status = 201, description = "Created"), (status = 400, description = "Bad rating or comment"), (status = 404, description = "Service not found")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    body: Result<Json<CreateReviewInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let input = extract_json(body)?;
    let review = state.reviews().create(&who, input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}
