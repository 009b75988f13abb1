use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{category_from, SeaOrmStore};
use crate::category::{Category, CategoryRepository};
use crate::errors::ServiceError;
use models::category::{self, Column};

#[async_trait]
impl CategoryRepository for SeaOrmStore {
    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
        let rows = category::Entity::find().order_by_asc(Column::Name).all(&self.db).await?;
        Ok(rows.into_iter().map(category_from).collect())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, ServiceError> {
        let found = category::Entity::find().filter(Column::Name.eq(name)).one(&self.db).await?;
        Ok(found.map(category_from))
    }

    async fn create_category(&self, name: &str) -> Result<Category, ServiceError> {
        if self.find_category_by_name(name).await?.is_some() {
            return Err(ServiceError::Conflict(format!("category '{name}' already exists")));
        }
        Ok(category_from(category::create(&self.db, Uuid::new_v4(), name).await?))
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = category::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
