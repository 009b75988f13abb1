use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{user_from, SeaOrmStore};
use crate::auth::domain::{Credentials, NewUser, User};
use crate::auth::repository::UserRepository;
use crate::errors::ServiceError;
use models::user;

#[async_trait]
impl UserRepository for SeaOrmStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await?
            .map(user_from)
            .transpose()
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        user::Entity::find_by_id(id).one(&self.db).await?.map(user_from).transpose()
    }

    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<User>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        user::Entity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(user_from)
            .collect()
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, ServiceError> {
        let found = user::Entity::find_by_id(user_id).one(&self.db).await?;
        Ok(found.map(|u| Credentials { user_id: u.id, password_hash: u.password_hash }))
    }

    async fn create_user(&self, new: NewUser) -> Result<User, ServiceError> {
        if self.find_user_by_email(&new.email).await?.is_some() {
            return Err(ServiceError::Conflict("email already registered".into()));
        }
        let created = user::create(
            &self.db,
            user::NewUser {
                id: Uuid::new_v4(),
                name: &new.name,
                email: &new.email,
                password_hash: &new.password_hash,
                role: new.role.as_str(),
                is_verified: new.is_verified,
            },
        )
        .await?;
        user_from(created)
    }

    async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        user::Entity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(user_from)
            .collect()
    }

    async fn toggle_verified(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        user::toggle_verified(&self.db, id).await?.map(user_from).transpose()
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(user::hard_delete(&self.db, id).await?)
    }

    async fn count_users(&self) -> Result<u64, ServiceError> {
        Ok(user::Entity::find().count(&self.db).await?)
    }
}
