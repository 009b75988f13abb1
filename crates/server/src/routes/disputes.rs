use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum::extract::rejection::JsonRejection;
use uuid::Uuid;

use service::dispute::{CreateDisputeInput, Dispute, DisputeStatusInput, DisputeView};
use service::policy::Identity;

use crate::errors::ApiError;
use crate::extract::extract_json;
use crate::state::ServerState;

#[utoipa::path(post, path = "/disputes", tag = "disputes", request_body = crate::openapi::CreateDisputeRequest, responses((status = 201, description = "Opened"), (status = 400, description = "Blank reason or self report"), (status = 404, description = "Reported user not found")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    body: Result<Json<CreateDisputeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Dispute>), ApiError> {
    let input = extract_json(body)?;
    let dispute = state.disputes().report(&who, input).await?;
    Ok((StatusCode::CREATED, Json(dispute)))
}

#[utoipa::path(get, path = "/disputes", tag = "disputes", responses((status = 200, description = "Newest first with both parties"), (status = 403, description = "Admins only")))]
pub async fn list(State(state): State<ServerState>, Extension(who): Extension<Identity>) -> Result<Json<Vec<DisputeView>>, ApiError> {
    Ok(Json(state.disputes().list(&who).await?))
}

#[utoipa::path(put, path = "/disputes/{id}/status", tag = "disputes", params(("id" = Uuid, Path, description = "Dispute id")), request_body = crate::openapi::StatusRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Unknown status"), (status = 404, description = "Not Found")))]
pub async fn set_status(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    Path(id): Path<Uuid>,
    body: Result<Json<DisputeStatusInput>, JsonRejection>,
) -> Result<Json<Dispute>, ApiError> {
    let input = extract_json(body)?;
    Ok(Json(state.disputes().set_status(&who, id, &input.status).await?))
}
