use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Credentials, NewUser, User};
use crate::errors::ServiceError;

/// Persistence for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lookup by normalized (lowercase) email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, ServiceError>;
    /// Users with the given ids; unknown ids are skipped.
    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<User>, ServiceError>;
    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, ServiceError>;
    /// Fails with `Conflict` when the email is taken.
    async fn create_user(&self, new: NewUser) -> Result<User, ServiceError>;
    /// All users, newest first.
    async fn list_users(&self) -> Result<Vec<User>, ServiceError>;
    /// Flips `is_verified`; `None` when the user does not exist.
    async fn toggle_verified(&self, id: Uuid) -> Result<Option<User>, ServiceError>;
    /// Removes the user and everything referencing it.
    async fn delete_user(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn count_users(&self) -> Result<u64, ServiceError>;
}
