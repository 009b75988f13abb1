use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum::extract::rejection::JsonRejection;
use uuid::Uuid;

use service::booking::domain::{Booking, BookingView, CreateBookingInput, StatusUpdateInput};
use service::policy::Identity;

use crate::errors::ApiError;
use crate::extract::extract_json;
use crate::state::ServerState;

#[utoipa::path(post, path = "/bookings", tag = "bookings", request_body = crate::openapi::CreateBookingRequest, responses((status = 201, description = "Booking created as pending/unpaid"), (status = 403, description = "Customers only"), (status = 404, description = "Service not found")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    body: Result<Json<CreateBookingInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let input = extract_json(body)?;
    let booking = state.bookings().create(&who, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[utoipa::path(get, path = "/bookings", tag = "bookings", responses((status = 200, description = "Provider: bookings on own services; customer: own bookings")))]
pub async fn list(State(state): State<ServerState>, Extension(who): Extension<Identity>) -> Result<Json<Vec<BookingView>>, ApiError> {
    Ok(Json(state.bookings().list_for(&who).await?))
}

#[utoipa::path(patch, path = "/bookings/{id}/status", tag = "bookings", params(("id" = Uuid, Path, description = "Booking id")), request_body = crate::openapi::StatusRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Invalid status or transition"), (status = 401, description = "Not the owning provider"), (status = 404, description = "Not Found")))]
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    Path(id): Path<Uuid>,
    body: Result<Json<StatusUpdateInput>, JsonRejection>,
) -> Result<Json<Booking>, ApiError> {
    let input = extract_json(body)?;
    Ok(Json(state.bookings().update_status(&who, id, &input.status).await?))
}

#[utoipa::path(patch, path = "/bookings/{id}/pay", tag = "bookings", params(("id" = Uuid, Path, description = "Booking id")),
    responses((status = 200, description = "Paid and confirmed"), (status = 401, description = "Not the booking customer"), (status = 404, description = "Not Found")))]
pub async fn pay(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, ApiError> {
    Ok(Json(state.bookings().pay(&who, id).await?))
}
