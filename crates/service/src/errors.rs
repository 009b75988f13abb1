use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// The caller does not own the record it tries to mutate.
    #[error("not authorized: {0}")]
    Unauthorized(String),
    /// The caller's role lacks the capability.
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        match models::errors::ModelError::from(e) {
            models::errors::ModelError::Conflict(m) => ServiceError::Conflict(m),
            other => ServiceError::Db(other.to_string()),
        }
    }
}
