use axum::{extract::State, Extension, Json};

use service::auth::domain::User;
use service::policy::Identity;

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/users", tag = "users", responses((status = 200, description = "Everyone except the caller, by name")))]
pub async fn directory(State(state): State<ServerState>, Extension(who): Extension<Identity>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.accounts().directory(&who).await?))
}
