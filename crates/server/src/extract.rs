use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::errors::ApiError;

/// Unwrap a JSON body, turning axum's rejection (bad syntax, wrong field
/// types, missing content type) into a 400 with the usual error envelope.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    result.map(|Json(v)| v).map_err(|err| ApiError::BadRequest(err.body_text()))
}
