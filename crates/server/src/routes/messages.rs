use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum::extract::rejection::JsonRejection;
use uuid::Uuid;

use service::messaging::domain::{Conversation, Message, SendMessageInput};
use service::policy::Identity;

use crate::errors::ApiError;
use crate::extract::extract_json;
use crate::state::ServerState;

#[utoipa::path(post, path = "/messages", tag = "messages", request_body = crate::openapi::SendMessageRequest, responses((status = 201, description = "Sent"), (status = 400, description = "Empty content"), (status = 404, description = "Recipient not found")))]
pub async fn send(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    body: Result<Json<SendMessageInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let input = extract_json(body)?;
    let message = state.messaging().send(&who, input).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(get, path = "/messages/conversations", tag = "messages", responses((status = 200, description = "Latest message per counterpart, newest first")))]
pub async fn conversations(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
) -> Result<Json<Vec<Conversation>>, ApiError> {
    Ok(Json(state.messaging().conversations(&who).await?))
}

#[utoipa::path(get, path = "/messages/{user_id}", tag = "messages", params(("user_id" = Uuid, Path, description = "Counterpart id")), responses((status = 200, description = "Thread, oldest first")))]
pub async fn thread(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(state.messaging().thread(&who, user_id).await?))
}
