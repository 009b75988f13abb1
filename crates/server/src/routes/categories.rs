use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum::extract::rejection::JsonRejection;
use uuid::Uuid;

use service::category::{Category, CreateCategoryInput};
use service::policy::Identity;

use crate::errors::ApiError;
use crate::extract::extract_json;
use crate::state::ServerState;

#[utoipa::path(get, path = "/categories", tag = "categories", responses((status = 200, description = "Categories by name")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.categories().list().await?))
}

#[utoipa::path(post, path = "/categories", tag = "categories", request_body = crate::openapi::CreateCategoryRequest, responses((status = 201, description = "Created"), (status = 400, description = "Blank name"), (status = 409, description = "Duplicate name")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    body: Result<Json<CreateCategoryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let input = extract_json(body)?;
    let category = state.categories().create(&who, input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(delete, path = "/categories/{id}", tag = "categories", params(("id" = Uuid, Path, description = "Category id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.categories().delete(&who, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
