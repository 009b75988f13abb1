use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use service::account::Stats;
use service::auth::domain::User;
use service::policy::Identity;

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/admin/stats", tag = "admin", responses((status = 200, description = "Dashboard counters"), (status = 403, description = "Admins only")))]
pub async fn stats(State(state): State<ServerState>, Extension(who): Extension<Identity>) -> Result<Json<Stats>, ApiError> {
    Ok(Json(state.accounts().stats(&who).await?))
}

#[utoipa::path(get, path = "/admin/users", tag = "admin", responses((status = 200, description = "All users, newest first"), (status = 403, description = "Admins only")))]
pub async fn list_users(State(state): State<ServerState>, Extension(who): Extension<Identity>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.accounts().list(&who).await?))
}

#[utoipa::path(get, path = "/admin/users/{id}", tag = "admin", params(("id" = Uuid, Path, description = "User id")), responses((status = 200, description = "User"), (status = 404, description = "Not Found")))]
pub async fn get_user(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.accounts().get(&who, id).await?))
}

#[utoipa::path(put, path = "/admin/users/{id}/verify", tag = "admin", params(("id" = Uuid, Path, description = "User id")), responses((status = 200, description = "isVerified flipped"), (status = 404, description = "Not Found")))]
pub async fn toggle_verify(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.accounts().toggle_verified(&who, id).await?))
}

#[utoipa::path(delete, path = "/admin/users/{id}", tag = "admin", params(("id" = Uuid, Path, description = "User id")), responses((status = 204, description = "Deleted with dependent records"), (status = 400, description = "Cannot delete yourself"), (status = 404, description = "Not Found")))]
pub async fn delete_user(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.accounts().delete(&who, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
