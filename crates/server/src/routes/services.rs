use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use axum::extract::rejection::JsonRejection;
use uuid::Uuid;

use service::catalog::domain::{CreateListingInput, Listing, ListingFilter, ListingView};
use service::policy::Identity;

use crate::errors::ApiError;
use crate::extract::extract_json;
use crate::state::ServerState;

#[utoipa::path(get, path = "/services", tag = "services",
    params(
        ("search" = Option<String>, Query, description = "Substring of title, description or category"),
        ("location" = Option<String>, Query, description = "Substring of location"),
    ),
    responses((status = 200, description = "Matching services with provider")))]
pub async fn list(State(state): State<ServerState>, Query(filter): Query<ListingFilter>) -> Result<Json<Vec<ListingView>>, ApiError> {
    Ok(Json(state.catalog().search(filter).await?))
}

#[utoipa::path(get, path = "/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "Service"), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<ListingView>, ApiError> {
    Ok(Json(state.catalog().get(id).await?))
}

#[utoipa::path(post, path = "/services", tag = "services", request_body = crate::openapi::CreateServiceRequest, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 403, description = "Providers only")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(who): Extension<Identity>,
    body: Result<Json<CreateListingInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
    let input = extract_json(body)?;
    let listing = state.catalog().create(&who, input).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}
